//! Community feed. Posts are local to the page and not persisted.

use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Post {
    id: usize,
    author: String,
    location: String,
    time: String,
    content: String,
    tags: Vec<String>,
    likes: u32,
    liked: bool,
}

fn seed_posts() -> Vec<Post> {
    [
        (
            "Priya Sharma",
            "Malviya Nagar",
            "2 hours ago",
            "The new streetlights on our lane finally work. Thanks to everyone who reported the outage!",
            "Lighting",
            24,
        ),
        (
            "Rahul Meena",
            "Vaishali Nagar",
            "5 hours ago",
            "Garbage pickup has been skipped twice this week. Has anyone else noticed?",
            "Waste",
            11,
        ),
        (
            "Sunita Verma",
            "C-Scheme",
            "Yesterday",
            "Volunteers needed for the Sunday tree planting drive at Central Park.",
            "Environment",
            38,
        ),
    ]
    .into_iter()
    .enumerate()
    .map(|(id, (author, location, time, content, tag, likes))| Post {
        id,
        author: author.to_owned(),
        location: location.to_owned(),
        time: time.to_owned(),
        content: content.to_owned(),
        tags: vec![tag.to_owned()],
        likes,
        liked: false,
    })
    .collect()
}

/// Comma separated tags, blanks dropped and `#` prefixes stripped.
fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|tag| tag.trim().trim_start_matches('#').trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

fn toggle_like(post: &mut Post) {
    if post.liked {
        post.likes = post.likes.saturating_sub(1);
    } else {
        post.likes += 1;
    }
    post.liked = !post.liked;
}

#[component]
pub fn CommunityPage() -> impl IntoView {
    let posts = RwSignal::new(seed_posts());
    let content = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());
    let tags = RwSignal::new(String::new());

    let on_post = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = content.get_untracked().trim().to_owned();
        if text.is_empty() {
            return;
        }
        let place = location.get_untracked().trim().to_owned();
        posts.update(|list| {
            let id = list.iter().map(|p| p.id + 1).max().unwrap_or(0);
            list.insert(
                0,
                Post {
                    id,
                    author: "You".to_owned(),
                    location: if place.is_empty() { "Your Location".to_owned() } else { place },
                    time: "Just now".to_owned(),
                    content: text,
                    tags: parse_tags(&tags.get_untracked()),
                    likes: 0,
                    liked: false,
                },
            );
        });
        content.set(String::new());
        location.set(String::new());
        tags.set(String::new());
    };

    view! {
        <section class="community-page">
            <h1>"Community"</h1>
            <form class="composer" on:submit=on_post>
                <textarea
                    rows="3"
                    placeholder="Share an update with your neighbours"
                    prop:value=move || content.get()
                    on:input=move |ev| content.set(event_target_value(&ev))
                ></textarea>
                <input
                    type="text"
                    placeholder="Location"
                    prop:value=move || location.get()
                    on:input=move |ev| location.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Tags, comma separated"
                    prop:value=move || tags.get()
                    on:input=move |ev| tags.set(event_target_value(&ev))
                />
                <button type="submit">"Post"</button>
            </form>
            <For
                each=move || posts.get()
                key=|post| (post.id, post.likes, post.liked)
                children=move |post| {
                    let id = post.id;
                    view! {
                        <article class="post-card">
                            <header>
                                <strong>{post.author}</strong>
                                <span>{format!("{} · {}", post.location, post.time)}</span>
                            </header>
                            <p>{post.content}</p>
                            <p class="post-card__tags">
                                {post.tags.into_iter().map(|tag| view! { <span>{format!("#{tag}")}</span> }).collect_view()}
                            </p>
                            <button
                                class="post-card__like"
                                class:post-card__like--active=post.liked
                                on:click=move |_| posts.update(|list| {
                                    if let Some(post) = list.iter_mut().find(|p| p.id == id) {
                                        toggle_like(post);
                                    }
                                })
                            >
                                {format!("♥ {}", post.likes)}
                            </button>
                        </article>
                    }
                }
            />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_trimmed_and_unprefixed() {
        assert_eq!(parse_tags(" #roads, ,water ,#"), ["roads", "water"]);
    }

    #[test]
    fn like_toggles_back_and_forth() {
        let mut post = seed_posts().remove(0);
        let before = post.likes;
        toggle_like(&mut post);
        assert!(post.liked);
        assert_eq!(post.likes, before + 1);
        toggle_like(&mut post);
        assert!(!post.liked);
        assert_eq!(post.likes, before);
    }
}
