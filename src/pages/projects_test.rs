use super::*;

#[test]
fn default_filter_shows_everything() {
    let all = ProjectFilter::default().apply(&PROJECTS);
    assert_eq!(all.len(), PROJECTS.len());

    let stats = ProjectStats::compute(&all);
    assert_eq!(stats.total, 6);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.ongoing, 3);
    assert_eq!(stats.budget, 1020);
    assert_eq!(stats.completed_percent(), 17);
}

#[test]
fn search_checks_title_and_description() {
    let filter = ProjectFilter {
        search: "RECYCLING".to_owned(),
        ..ProjectFilter::default()
    };
    let found = filter.apply(&PROJECTS);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 6);
}

#[test]
fn category_and_status_combine() {
    let filter = ProjectFilter {
        category: "Environment".to_owned(),
        status: "Planning".to_owned(),
        ..ProjectFilter::default()
    };
    let ids: Vec<u32> = filter.apply(&PROJECTS).iter().map(|p| p.id).collect();
    assert_eq!(ids, [6]);
}

#[test]
fn empty_selection_has_zero_percent() {
    let filter = ProjectFilter {
        search: "no such project".to_owned(),
        ..ProjectFilter::default()
    };
    let stats = ProjectStats::compute(&filter.apply(&PROJECTS));
    assert_eq!(stats, ProjectStats::default());
    assert_eq!(stats.completed_percent(), 0);
}

#[test]
fn choices_are_distinct_in_catalogue_order() {
    assert_eq!(
        choices(&PROJECTS, |p| p.status),
        ["All", "In Progress", "Completed", "Planning"]
    );
}
