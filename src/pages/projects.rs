//! Government projects tracker over a static project catalogue.

#[cfg(test)]
#[path = "projects_test.rs"]
mod projects_test;

use leptos::prelude::*;

pub const ALL: &str = "All";

#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub status: &'static str,
    pub ward: &'static str,
    pub department: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
    /// Crore rupees.
    pub budget: u32,
    pub progress: u8,
}

pub static PROJECTS: [Project; 6] = [
    Project {
        id: 1,
        title: "Smart City Infrastructure",
        description: "IoT sensors and traffic management systems across the city core.",
        category: "Infrastructure",
        status: "In Progress",
        ward: "Ward 1",
        department: "Public Works",
        start_date: "2023-01-15",
        end_date: "2024-12-31",
        budget: 250,
        progress: 45,
    },
    Project {
        id: 2,
        title: "Green Park Development",
        description: "An eco-friendly park with sustainable features and community spaces.",
        category: "Environment",
        status: "Completed",
        ward: "Ward 2",
        department: "Parks & Recreation",
        start_date: "2022-06-01",
        end_date: "2023-05-30",
        budget: 75,
        progress: 100,
    },
    Project {
        id: 3,
        title: "Public Transport Upgrade",
        description: "New buses and digital payment integration for city transport.",
        category: "Transportation",
        status: "In Progress",
        ward: "Ward 3",
        department: "Transport",
        start_date: "2023-03-01",
        end_date: "2024-06-30",
        budget: 180,
        progress: 30,
    },
    Project {
        id: 4,
        title: "Digital Education Hub",
        description: "A modern digital learning center for students and adults.",
        category: "Education",
        status: "Planning",
        ward: "Ward 4",
        department: "Education",
        start_date: "2024-01-01",
        end_date: "2025-12-31",
        budget: 120,
        progress: 10,
    },
    Project {
        id: 5,
        title: "Healthcare Center Expansion",
        description: "New specialized departments at the existing healthcare facilities.",
        category: "Healthcare",
        status: "In Progress",
        ward: "Ward 5",
        department: "Health",
        start_date: "2023-07-01",
        end_date: "2024-12-31",
        budget: 300,
        progress: 25,
    },
    Project {
        id: 6,
        title: "Waste Management System",
        description: "Advanced waste segregation and recycling for every ward.",
        category: "Environment",
        status: "Planning",
        ward: "Ward 6",
        department: "Sanitation",
        start_date: "2024-02-01",
        end_date: "2025-06-30",
        budget: 95,
        progress: 5,
    },
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectFilter {
    pub search: String,
    pub category: String,
    pub status: String,
}

impl Default for ProjectFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL.to_owned(),
            status: ALL.to_owned(),
        }
    }
}

impl ProjectFilter {
    /// Title or description contains the search text (case-insensitive),
    /// and category and status match unless set to "All".
    pub fn matches(&self, project: &Project) -> bool {
        let needle = self.search.trim().to_lowercase();
        let text = needle.is_empty()
            || project.title.to_lowercase().contains(&needle)
            || project.description.to_lowercase().contains(&needle);
        let category = self.category == ALL || project.category == self.category;
        let status = self.status == ALL || project.status == self.status;
        text && category && status
    }

    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Header counters over the filtered projects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectStats {
    pub total: usize,
    pub completed: usize,
    pub ongoing: usize,
    pub budget: u32,
}

impl ProjectStats {
    pub fn compute(projects: &[&Project]) -> Self {
        projects.iter().fold(Self::default(), |mut stats, project| {
            stats.total += 1;
            match project.status {
                "Completed" => stats.completed += 1,
                "In Progress" => stats.ongoing += 1,
                _ => {}
            }
            stats.budget += project.budget;
            stats
        })
    }

    /// Completed share in whole percent; 0 for an empty list.
    pub fn completed_percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            (self.completed * 100 + self.total / 2) / self.total
        }
    }
}

/// "All" followed by each distinct value in catalogue order.
pub fn choices(projects: &[Project], field: fn(&Project) -> &'static str) -> Vec<&'static str> {
    let mut out = vec![ALL];
    for project in projects {
        let value = field(project);
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let filter = RwSignal::new(ProjectFilter::default());
    let visible = move || filter.with(|f| f.apply(&PROJECTS).into_iter().cloned().collect::<Vec<_>>());
    let stats = move || filter.with(|f| ProjectStats::compute(&f.apply(&PROJECTS)));

    let select = move |label: &'static str, options: Vec<&'static str>, set: fn(&mut ProjectFilter, String)| {
        view! {
            <label>
                {label}
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    filter.update(|f| set(f, value));
                }>
                    {options.into_iter().map(|option| view! { <option value=option>{option}</option> }).collect_view()}
                </select>
            </label>
        }
    };

    view! {
        <section class="projects-page">
            <header class="page-header">
                <h1>"Government Projects & Tracking"</h1>
                <input
                    type="search"
                    placeholder="Search projects..."
                    prop:value=move || filter.with(|f| f.search.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        filter.update(|f| f.search = value);
                    }
                />
            </header>
            <div class="stats">
                <div class="stats__item"><span>{move || stats().total}</span>"Total Projects"</div>
                <div class="stats__item"><span>{move || format!("{}%", stats().completed_percent())}</span>"Completed"</div>
                <div class="stats__item"><span>{move || stats().ongoing}</span>"Ongoing"</div>
                <div class="stats__item"><span>{move || format!("₹{} Cr", stats().budget)}</span>"Total Budget"</div>
            </div>
            <div class="filters">
                {select("Category", choices(&PROJECTS, |p| p.category), |f, v| f.category = v)}
                {select("Status", choices(&PROJECTS, |p| p.status), |f, v| f.status = v)}
            </div>
            <div class="project-grid">
                {move || {
                    visible()
                        .into_iter()
                        .map(|project| {
                            view! {
                                <article class="project-card">
                                    <header>
                                        <h3>{project.title}</h3>
                                        <span class="status-badge">{project.status}</span>
                                    </header>
                                    <p>{project.description}</p>
                                    <div class="progress">
                                        <div class="progress__bar" style:width=format!("{}%", project.progress)></div>
                                    </div>
                                    <p class="project-card__meta">
                                        {format!(
                                            "{} · {} · {} to {} · ₹{} Cr",
                                            project.ward,
                                            project.department,
                                            project.start_date,
                                            project.end_date,
                                            project.budget,
                                        )}
                                    </p>
                                </article>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </section>
    }
}
