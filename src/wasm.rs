use crate::{
    AnswerOutcome, ClipCatalog, DanceType, QuizConfig, RoundState, Session, catalog_or_demo,
    clip_path,
};
use gloo_net::http::Request;
use leptos::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::wasm_bindgen;

const CATALOG_URL: &str = "catalog.json";
const CONFIG_URL: &str = "quiz.json";

#[derive(Clone, Copy, PartialEq, Eq)]
enum FeedbackKind {
    Neutral,
    Correct,
    Wrong,
}

#[derive(Clone, PartialEq, Eq)]
struct FeedbackState {
    message: String,
    kind: FeedbackKind,
}

impl FeedbackState {
    fn neutral(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: FeedbackKind::Neutral,
        }
    }

    fn from_outcome(outcome: AnswerOutcome) -> Self {
        let kind = match outcome {
            AnswerOutcome::Correct { .. } => FeedbackKind::Correct,
            AnswerOutcome::Wrong { .. } => FeedbackKind::Wrong,
            AnswerOutcome::NoSelection | AnswerOutcome::AlreadyAnswered => FeedbackKind::Neutral,
        };

        Self {
            message: outcome.to_string(),
            kind,
        }
    }

    fn class(&self) -> &'static str {
        match self.kind {
            FeedbackKind::Neutral => "feedback",
            FeedbackKind::Correct => "feedback correct",
            FeedbackKind::Wrong => "feedback wrong",
        }
    }
}

async fn fetch_text(url: &str) -> Result<String, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|error| error.to_string())?;

    if !response.ok() {
        return Err(format!("{} returned HTTP {}", url, response.status()));
    }

    response.text().await.map_err(|error| error.to_string())
}

/// Catalog, config and the load problems to show above the quiz.
#[derive(Clone)]
struct Setup {
    catalog: ClipCatalog,
    config: QuizConfig,
    notices: Vec<String>,
}

async fn load_setup() -> Setup {
    let catalog_text = fetch_text(CATALOG_URL).await.ok();
    let config_text = fetch_text(CONFIG_URL).await.ok();

    let (catalog, catalog_error) = catalog_or_demo(catalog_text.as_deref());
    let (config, config_error) = QuizConfig::from_json_or_default(config_text.as_deref());

    let notices = [
        catalog_error.map(|error| format!("{}: {}", CATALOG_URL, error)),
        config_error.map(|error| format!("{}: {}", CONFIG_URL, error)),
    ]
    .into_iter()
    .flatten()
    .collect();

    Setup {
        catalog,
        config,
        notices,
    }
}

fn start_session(
    rng: StoredValue<StdRng>,
    catalog: StoredValue<ClipCatalog>,
    total_rounds: usize,
) -> Result<Session, String> {
    rng.try_update_value(|rng| {
        catalog.with_value(|catalog| Session::with_rounds(rng, catalog, total_rounds))
    })
    .map(|result| result.map_err(|error| error.to_string()))
    .unwrap_or_else(|| Err("quiz state is no longer available".to_string()))
}

fn parse_selection(value: &str) -> Option<DanceType> {
    if value.is_empty() {
        None
    } else {
        value.parse().ok()
    }
}

#[component]
fn Summary(session: Session) -> impl IntoView {
    let summary = session.summary();

    view! {
        <section class="summary-card">
            <p class="eyebrow">Summary</p>
            <p class="headline">{summary.to_string()}</p>
            <ol class="rounds">
                {summary
                    .rounds
                    .into_iter()
                    .map(|record| {
                        let class = if record.correct { "correct" } else { "wrong" };
                        view! {
                            <li class=class>
                                {format!(
                                    "Round {}: {} (you answered {})",
                                    record.round,
                                    record.dance,
                                    record.answer,
                                )}
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>
        </section>
    }
}

#[component]
fn Quiz(catalog: ClipCatalog, config: QuizConfig, notices: Vec<String>) -> impl IntoView {
    let total_rounds = config.total_rounds;
    let clip_dir = store_value(config.clip_dir);
    let rng = store_value(StdRng::from_entropy());
    let catalog = store_value(catalog);

    let load_notice = (!notices.is_empty()).then(|| notices.join("\n"));
    let (session, error) = match start_session(rng, catalog, total_rounds) {
        Ok(session) => (create_rw_signal(Some(session)), create_rw_signal(load_notice)),
        Err(message) => (create_rw_signal(None), create_rw_signal(Some(message))),
    };
    let selection = create_rw_signal(String::new());
    let feedback = create_rw_signal(FeedbackState::neutral("Listen to the clip and pick a dance."));

    let check = move |_| {
        let candidate = parse_selection(&selection.get());
        let outcome = session
            .try_update(|state| state.as_mut().map(|session| session.submit_answer(candidate)))
            .flatten();

        if let Some(outcome) = outcome {
            feedback.set(FeedbackState::from_outcome(outcome));
        }
    };

    let next = move |_| {
        let state = session
            .try_update(|state| state.as_mut().map(Session::advance_round))
            .flatten();

        match state {
            Some(RoundState::InProgress { round }) => {
                selection.set(String::new());
                feedback.set(FeedbackState::neutral(format!("Round {}: listen closely.", round)));
            }
            Some(state) => feedback.set(FeedbackState::neutral(state.to_string())),
            None => {}
        }
    };

    let replay = move |_| match start_session(rng, catalog, total_rounds) {
        Ok(fresh) => {
            session.set(Some(fresh));
            error.set(None);
            selection.set(String::new());
            feedback.set(FeedbackState::neutral("New quiz started."));
        }
        Err(message) => error.set(Some(message)),
    };

    let round_label = move || {
        session.with(|state| {
            state
                .as_ref()
                .map(|session| format!("{} / {}", session.round(), session.total_rounds()))
                .unwrap_or_default()
        })
    };

    let score_label = move || {
        session.with(|state| {
            state
                .as_ref()
                .map(|session| session.correct_count().to_string())
                .unwrap_or_default()
        })
    };

    let clip_src = move || {
        session.with(|state| {
            state
                .as_ref()
                .map(|session| clip_dir.with_value(|dir| clip_path(dir, session.current_clip())))
                .unwrap_or_default()
        })
    };

    let finished = move || {
        session.with(|state| {
            state
                .as_ref()
                .filter(|session| session.is_finished())
                .cloned()
        })
    };

    view! {
        <section class="status-panel">
            <div class="status-item">
                <p class="label">Round</p>
                <p class="value">{round_label}</p>
            </div>
            <div class="status-item">
                <p class="label">Correct</p>
                <p class="value">{score_label}</p>
            </div>
        </section>

        {move || error.get().map(|message| view! {
            <section class="error-card">
                <p class="eyebrow">Quiz error</p>
                <p class="error-body">{message}</p>
            </section>
        })}

        <section class="quiz-card">
            <audio controls=true autoplay=true src=clip_src></audio>
            <div class="answer-row">
                <select
                    prop:value=move || selection.get()
                    on:change=move |ev| selection.set(event_target_value(&ev))
                >
                    <option value="">"Choose a dance…"</option>
                    {DanceType::ALL
                        .iter()
                        .map(|dance| view! { <option value=dance.slug()>{dance.label()}</option> })
                        .collect_view()}
                </select>
                <button class="primary" on:click=check>"Check"</button>
                <button class="pill" on:click=next>"Next"</button>
                <button class="pill" on:click=replay>"Replay"</button>
            </div>
            <p class=move || feedback.with(FeedbackState::class)>
                {move || feedback.with(|state| state.message.clone())}
            </p>
        </section>

        {move || finished().map(|session| view! { <Summary session=session /> })}
    }
}

#[component]
fn App() -> impl IntoView {
    let setup = create_local_resource(
        || (),
        |_| async move { load_setup().await },
    );

    view! {
        <main class="page">
            <header class="page-header">
                <p class="eyebrow">Dance listening quiz</p>
                <h1 class="headline">"Which dance is playing?"</h1>
                <p class="lede">"Waltz, Minuet, Trio, Ländler, Deutscher or Ecossaise."</p>
            </header>

            <Suspense fallback=move || view! { <p class="lede">"Loading clips…"</p> }>
                {move || {
                    setup
                        .get()
                        .map(|setup| {
                            view! {
                                <Quiz
                                    catalog=setup.catalog
                                    config=setup.config
                                    notices=setup.notices
                                />
                            }
                        })
                }}
            </Suspense>
        </main>
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    mount_to_body(|| view! { <App /> });
}
