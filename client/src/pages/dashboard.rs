//! Landing dashboards for doctors (project) and businesses (sales).
//!
//! Both summarize the shared job slice; neither fetches anything else.

use leptos::prelude::*;

use crate::net::types::JobStatus;
use crate::pages::jobs::{load_jobs, status_label};
use crate::state::jobs::JobsState;
use crate::state::session::SessionState;

#[component]
fn StatTile(label: &'static str, #[prop(into)] value: Signal<usize>) -> impl IntoView {
    view! {
        <div class="stat-tile">
            <span class="stat-tile__value">{move || value.get()}</span>
            <span class="stat-tile__label">{label}</span>
        </div>
    }
}

fn count(jobs: RwSignal<JobsState>, status: JobStatus) -> Signal<usize> {
    Signal::derive(move || jobs.with(|s| s.with_status(status).len()))
}

#[component]
pub fn ProjectDashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let jobs = expect_context::<RwSignal<JobsState>>();
    load_jobs(session, jobs);

    let greeting = move || {
        session.with(|s| {
            s.user
                .as_ref()
                .map(|u| format!("Welcome back, {}", u.display_name()))
                .unwrap_or_default()
        })
    };

    view! {
        <section class="page dashboard">
            <p class="dashboard__greeting">{greeting}</p>
            <div class="dashboard__tiles">
                <StatTile label="Open jobs" value=count(jobs, JobStatus::Open)/>
                <StatTile label="Accepted" value=count(jobs, JobStatus::Accepted)/>
                <StatTile label="Completed" value=count(jobs, JobStatus::Completed)/>
            </div>
            <a class="btn btn--primary" href="/app/project/jobs">"Browse the job board"</a>
        </section>
    }
}

#[component]
pub fn SalesDashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let jobs = expect_context::<RwSignal<JobsState>>();
    load_jobs(session, jobs);

    let tiles = [JobStatus::Open, JobStatus::Accepted, JobStatus::Completed, JobStatus::Cancelled]
        .into_iter()
        .map(|status| view! { <StatTile label=status_label(status) value=count(jobs, status)/> })
        .collect_view();

    view! {
        <section class="page dashboard">
            <div class="dashboard__tiles">{tiles}</div>
            <div class="page__toolbar">
                <a class="btn btn--primary" href="/app/sales/post-job">"Post a job"</a>
                <a class="btn" href="/app/sales/jobs">"View posted jobs"</a>
            </div>
        </section>
    }
}
