//! Job board (doctors), posted jobs and the post-a-job form (businesses).

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::tachys::view::any_view::{AnyView, IntoAny};

use crate::components::field::TextField;
use crate::net::types::{Job, JobStatus};
use crate::state::collection::LoadState;
use crate::state::jobs::JobsState;
use crate::state::notice::NoticeState;
use crate::state::session::SessionState;
use crate::util::validation::{FieldErrors, validate_required};

/// Fetch the job list once per visit; later visits reuse the slice.
pub fn load_jobs(session: RwSignal<SessionState>, jobs: RwSignal<JobsState>) {
    if jobs.with_untracked(|s| s.jobs.load != LoadState::Idle) {
        return;
    }
    jobs.update(|s| s.jobs.begin());
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = session.with_untracked(SessionState::api).list_jobs().await;
        super::expire_on_auth_error(session, &result);
        jobs.update(|s| s.jobs.settle(result));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = session;
}

pub(crate) fn status_label(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Open => "Open",
        JobStatus::Accepted => "Accepted",
        JobStatus::Completed => "Completed",
        JobStatus::Cancelled => "Cancelled",
    }
}

fn job_row(job: Job, action: Option<AnyView>) -> impl IntoView {
    let rate = job.rate.map(|r| format!("{r:.2}")).unwrap_or_default();
    view! {
        <tr>
            <td>{job.title}</td>
            <td>{job.location.unwrap_or_default()}</td>
            <td>{rate}</td>
            <td>{status_label(job.status)}</td>
            <td>{action}</td>
        </tr>
    }
}

#[component]
fn ListStatus(jobs: RwSignal<JobsState>) -> impl IntoView {
    move || {
        jobs.with(|s| match &s.jobs.load {
            LoadState::Loading if s.jobs.is_empty() => Some(view! { <p class="page-status">"Loading..."</p> }.into_any()),
            LoadState::Failed(message) => Some(view! { <p class="page-status page-status--error">{message.clone()}</p> }.into_any()),
            _ => None,
        })
    }
}

#[component]
pub fn JobBoardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let jobs = expect_context::<RwSignal<JobsState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    load_jobs(session, jobs);

    let accept = move |id: String| {
        if !jobs.try_update(|s| s.begin_accept(&id)).unwrap_or(false) {
            return;
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::components::notice_banner::notify;
            use crate::state::notice::NoticeKind;

            let result = session.with_untracked(SessionState::api).accept_job(&id).await;
            super::expire_on_auth_error(session, &result);
            match result {
                Ok(job) => {
                    jobs.update(|s| s.finish_accept(Some(job)));
                    notify(notices, NoticeKind::Success, "Job accepted");
                }
                Err(e) => {
                    jobs.update(|s| s.finish_accept(None));
                    notify(notices, NoticeKind::Error, e.user_message());
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = notices;
    };

    view! {
        <section class="page jobs-page">
            <ListStatus jobs=jobs/>
            <table class="data-table">
                <thead>
                    <tr><th>"Job"</th><th>"Location"</th><th>"Rate"</th><th>"Status"</th><th></th></tr>
                </thead>
                <tbody>
                    {move || {
                        let pending = jobs.with(|s| s.accepting.clone());
                        jobs.with(|s| s.open_jobs().into_iter().cloned().collect::<Vec<_>>())
                            .into_iter()
                            .map(|job| {
                                let id = job.id.clone();
                                let busy = pending.is_some();
                                let button = view! {
                                    <button class="btn btn--primary" disabled=busy on:click=move |_| accept(id.clone())>
                                        "Accept"
                                    </button>
                                }
                                .into_any();
                                job_row(job, Some(button))
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
            <Show when=move || jobs.with(|s| s.jobs.load == LoadState::Ready && s.open_jobs().is_empty())>
                <p class="page-status">"No open jobs right now."</p>
            </Show>
        </section>
    }
}

#[component]
pub fn PostedJobsPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let jobs = expect_context::<RwSignal<JobsState>>();
    load_jobs(session, jobs);

    let mine = move || {
        let me = session.with(|s| s.user.as_ref().and_then(|u| u.id().map(str::to_owned)));
        jobs.with(|s| match me.as_deref() {
            Some(id) => s.posted_by(id).into_iter().cloned().collect::<Vec<_>>(),
            None => s.jobs.items().to_vec(),
        })
    };

    view! {
        <section class="page jobs-page">
            <div class="page__toolbar">
                <a class="btn btn--primary" href="/app/sales/post-job">"Post a job"</a>
            </div>
            <ListStatus jobs=jobs/>
            <table class="data-table">
                <thead>
                    <tr><th>"Job"</th><th>"Location"</th><th>"Rate"</th><th>"Status"</th><th></th></tr>
                </thead>
                <tbody>{move || mine().into_iter().map(|job| job_row(job, None)).collect_view()}</tbody>
            </table>
        </section>
    }
}

#[component]
pub fn PostJobPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let jobs = expect_context::<RwSignal<JobsState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = leptos_router::hooks::use_navigate();

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let mut field_errors = FieldErrors::new();
        if let Some(e) = validate_required("Title", &title.get_untracked()) {
            field_errors.insert("title", e);
        }
        if let Some(e) = validate_required("Description", &description.get_untracked()) {
            field_errors.insert("description", e);
        }
        let valid = field_errors.is_empty();
        errors.set(field_errors);
        if !valid {
            return;
        }
        let location_value = location.get_untracked().trim().to_owned();
        let job = crate::net::types::NewJob {
            title: title.get_untracked().trim().to_owned(),
            description: description.get_untracked().trim().to_owned(),
            location: (!location_value.is_empty()).then_some(location_value),
            category_id: None,
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            use crate::components::notice_banner::notify;
            use crate::state::notice::NoticeKind;

            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = session.with_untracked(SessionState::api).post_job(&job).await;
                super::expire_on_auth_error(session, &result);
                match result {
                    Ok(created) => {
                        jobs.update(|s| s.jobs.upsert(created));
                        notify(notices, NoticeKind::Success, "Job posted");
                        navigate("/app/sales/jobs", leptos_router::NavigateOptions::default());
                    }
                    Err(e) => notify(notices, NoticeKind::Error, e.user_message()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (job, &navigate, session, jobs, notices);
        }
    };

    view! {
        <section class="page">
            <form class="form-card" on:submit=on_submit>
                <TextField label="Title" name="title" value=title errors=errors/>
                <TextField label="Description" name="description" value=description errors=errors/>
                <TextField label="Location" name="location" value=location errors=errors/>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "Post job"
                </button>
            </form>
        </section>
    }
}
