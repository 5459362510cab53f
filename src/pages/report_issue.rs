//! Report-issue wizard page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered behind `UserProtected`. The citizen token is re-verified on
//! mount; the wizard itself lives in `state::report::ReportWizard` and this
//! page only drives it from events and API results.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::notice_bar::push_notice;
use crate::net::api::{self, MAX_ISSUE_MEDIA};
use crate::net::error::AppError;
use crate::net::http::{BrowserApiClient, Upload};
use crate::net::types::IssueCategory;
use crate::state::auth::AuthState;
use crate::state::notice::{NoticeKind, NoticeState};
use crate::state::report::{MAX_DESCRIPTION_CHARS, ReportStep, ReportWizard};
use crate::util::auth::LOGIN_PATH;
use crate::util::geolocation::current_position;

const SESSION_EXPIRED: &str = "Your session has expired. Please login again.";

/// Files picked in a file input, in selection order.
#[cfg(feature = "csr")]
fn selected_uploads(ev: &leptos::ev::Event) -> Vec<Upload> {
    use wasm_bindgen::JsCast;

    let Some(input) = ev
        .target()
        .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
    else {
        return Vec::new();
    };
    let uploads = input
        .files()
        .map(|files| (0..files.length()).filter_map(|i| files.get(i)).map(Upload::from_file).collect())
        .unwrap_or_default();
    // Allow picking the same file again after removing it.
    input.set_value("");
    uploads
}

#[cfg(not(feature = "csr"))]
fn selected_uploads(_ev: &leptos::ev::Event) -> Vec<Upload> {
    Vec::new()
}

#[component]
pub fn ReportIssuePage() -> impl IntoView {
    let client = expect_context::<BrowserApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    let city = auth.with_untracked(|a| a.city().map(str::to_owned).unwrap_or_default());
    let wizard = RwSignal::new_local(ReportWizard::new(&city));

    {
        let client = client.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api::verify_citizen(&client).await {
                Ok(_) => log::debug!("citizen session verified for report"),
                Err(AppError::Unauthorized { .. }) => {
                    push_notice(notices, NoticeKind::Error, SESSION_EXPIRED);
                    navigate(LOGIN_PATH, NavigateOptions::default());
                }
                Err(err) => log::warn!("citizen verify failed: {err}"),
            }
        });
    }

    let verify_client = client.clone();
    let on_verify = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if wizard.with_untracked(|w| w.busy) {
            return;
        }
        let (aadhar, city) = match wizard.with_untracked(|w| w.aadhar_for_verification().map(|a| (a, w.city.clone()))) {
            Ok(pair) => pair,
            Err(err) => {
                wizard.update(|w| w.error = Some(err.user_message("Check your details.")));
                return;
            }
        };
        wizard.update(|w| {
            w.busy = true;
            w.error = None;
        });

        let client = verify_client.clone();
        leptos::task::spawn_local(async move {
            match api::verify_city(&client, &aadhar, &city).await {
                Ok(valid) => {
                    wizard.try_update(|w| w.city_verified(valid));
                    if valid {
                        let location = current_position().await;
                        if location.is_none() {
                            log::info!("no device location for report");
                        }
                        wizard.try_update(|w| w.location = location);
                    }
                }
                Err(err) => {
                    log::warn!("city verification failed: {err}");
                    wizard.try_update(|w| w.failed(err.user_message("Verification failed. Please try again.")));
                }
            }
        });
    };

    let on_files = move |ev: leptos::ev::Event| {
        let uploads = selected_uploads(&ev);
        let dropped = wizard.try_update(|w| w.add_media(uploads)).unwrap_or(0);
        if dropped > 0 {
            push_notice(
                notices,
                NoticeKind::Info,
                format!("Only {MAX_ISSUE_MEDIA} files can be attached; {dropped} skipped."),
            );
        }
    };

    let on_details = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        wizard.update(|w| {
            w.advance_to_review();
        });
    };

    let on_submit = move |_: leptos::ev::MouseEvent| {
        if wizard.with_untracked(|w| w.busy) {
            return;
        }
        let user_id = auth.with_untracked(|a| a.user.as_ref().and_then(|u| u.id.clone()));
        let report = match wizard.with_untracked(|w| w.build_report(user_id)) {
            Ok(report) => report,
            Err(err) => {
                wizard.update(|w| w.error = Some(err.user_message("Check the report.")));
                return;
            }
        };
        wizard.update(|w| {
            w.busy = true;
            w.error = None;
        });

        let client = client.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api::report_issue(&client, &report).await {
                Ok(receipt) => {
                    log::info!("issue reported: {:?}", receipt.id);
                    wizard.try_update(ReportWizard::submitted);
                    push_notice(notices, NoticeKind::Success, "Issue reported successfully!");
                }
                Err(AppError::Unauthorized { .. }) => {
                    wizard.try_update(|w| w.busy = false);
                    push_notice(notices, NoticeKind::Error, SESSION_EXPIRED);
                    navigate(LOGIN_PATH, NavigateOptions::default());
                }
                Err(err) => {
                    log::warn!("issue report failed: {err}");
                    wizard.try_update(|w| w.failed(err.user_message("Failed to submit report. Please try again.")));
                }
            }
        });
    };

    let verify_step = move || {
        view! {
            <form class="wizard__form" on:submit=on_verify.clone()>
                <p>
                    "Registered city: "
                    <strong>{move || wizard.with(|w| if w.city.is_empty() { "unknown".to_owned() } else { w.city.clone() })}</strong>
                </p>
                <label>
                    "Last 2 digits of your Aadhar"
                    <input
                        type="text"
                        inputmode="numeric"
                        maxlength="2"
                        prop:value=move || wizard.with(|w| w.aadhar.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            wizard.update(|w| w.aadhar = value);
                        }
                    />
                </label>
                <button type="submit" disabled=move || wizard.with(|w| w.busy)>
                    {move || if wizard.with(|w| w.busy) { "Verifying..." } else { "Verify" }}
                </button>
            </form>
        }
    };

    let details_step = move || {
        view! {
            <form class="wizard__form" on:submit=on_details>
                <label>
                    "Category"
                    <select on:change=move |ev| {
                        let category = IssueCategory::parse(&event_target_value(&ev));
                        wizard.update(|w| w.category = category);
                    }>
                        <option value="" selected=move || wizard.with(|w| w.category.is_none())>
                            "Select a category"
                        </option>
                        {IssueCategory::ALL
                            .into_iter()
                            .map(|category| {
                                view! {
                                    <option
                                        value=category.as_str()
                                        selected=move || wizard.with(|w| w.category == Some(category))
                                    >
                                        {category.as_str()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
                <label>
                    "Description"
                    <textarea
                        rows="5"
                        maxlength=MAX_DESCRIPTION_CHARS.to_string()
                        prop:value=move || wizard.with(|w| w.description.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            wizard.update(|w| w.description = value);
                        }
                    ></textarea>
                    <span class="wizard__counter">
                        {move || wizard.with(|w| w.description.chars().count())}
                        "/"
                        {MAX_DESCRIPTION_CHARS}
                    </span>
                </label>
                <label>
                    {format!("Photos or videos (up to {MAX_ISSUE_MEDIA})")}
                    <input type="file" accept="image/*,video/*" multiple on:change=on_files/>
                </label>
                <ul class="wizard__media">
                    {move || {
                        wizard.with(|w| {
                            w.media
                                .iter()
                                .enumerate()
                                .map(|(index, upload)| {
                                    let name = upload.file_name.clone();
                                    view! {
                                        <li>
                                            {name}
                                            <button type="button" on:click=move |_| wizard.update(|w| w.remove_media(index))>
                                                "Remove"
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view()
                        })
                    }}
                </ul>
                <p class="wizard__location">
                    {move || match wizard.with(|w| w.location) {
                        Some(point) => format!("Location attached ({:.5}, {:.5})", point.lat, point.lng),
                        None => "Location unavailable; the report will be sent without it.".to_owned(),
                    }}
                </p>
                <div class="wizard__actions">
                    <button type="button" on:click=move |_| wizard.update(ReportWizard::back)>"Back"</button>
                    <button type="submit">"Review"</button>
                </div>
            </form>
        }
    };

    let review_step = move || {
        view! {
            <div class="wizard__review">
                <dl>
                    <dt>"City"</dt>
                    <dd>{move || wizard.with(|w| w.city.clone())}</dd>
                    <dt>"Category"</dt>
                    <dd>{move || wizard.with(|w| w.category.map(IssueCategory::as_str).unwrap_or_default())}</dd>
                    <dt>"Description"</dt>
                    <dd>{move || wizard.with(|w| w.description.trim().to_owned())}</dd>
                    <dt>"Attachments"</dt>
                    <dd>{move || wizard.with(|w| w.media.len())}</dd>
                </dl>
                <div class="wizard__actions">
                    <button type="button" disabled=move || wizard.with(|w| w.busy) on:click=move |_| wizard.update(ReportWizard::back)>
                        "Back"
                    </button>
                    <button type="button" disabled=move || wizard.with(|w| w.busy) on:click=on_submit.clone()>
                        {move || if wizard.with(|w| w.busy) { "Submitting..." } else { "Submit Report" }}
                    </button>
                </div>
            </div>
        }
    };

    let submitted_step = move || {
        view! {
            <div class="wizard__done">
                <h2>"Thank you!"</h2>
                <p>"Your report has been sent to the municipal team."</p>
                <button type="button" on:click=move |_| wizard.update(ReportWizard::reset)>"Report another"</button>
            </div>
        }
    };

    view! {
        <section class="report-page">
            <h1>"Report an Issue"</h1>
            <ol class="wizard__steps">
                {[ReportStep::Verify, ReportStep::Details, ReportStep::Review, ReportStep::Submitted]
                    .into_iter()
                    .map(|step| {
                        view! {
                            <li class:wizard__step--active=move || wizard.with(|w| w.step.index() >= step.index())>
                                {step.title()}
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>
            {move || wizard.with(|w| w.error.clone()).map(|message| view! { <p class="wizard__error">{message}</p> })}
            {move || match wizard.with(|w| w.step) {
                ReportStep::Verify => verify_step().into_any(),
                ReportStep::Details => details_step().into_any(),
                ReportStep::Review => review_step().into_any(),
                ReportStep::Submitted => submitted_step().into_any(),
            }}
        </section>
    }
}
