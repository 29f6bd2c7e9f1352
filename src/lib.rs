pub mod admin;
pub mod compare;
pub mod data;
pub mod detail;
pub mod discover;
pub mod dropflow;
pub mod favorites;
pub mod filter;
pub mod notify;
pub mod stats;
pub mod storage;
pub mod store;
pub mod theme;
pub mod tier;

use admin::{logout, restore_session, AdminGate};
use compare::{Pick, Selection, COMPARE_LIMIT};
use data::{export_filename, export_json, Game, GameDraft};
use detail::{detail_href, fallback_picture, find_by_id, query_id, DetailView};
use discover::surprise_me;
use dropflow::DragFlow;
use favorites::Favorites;
use filter::{filter_games, FilterCriteria};
use gloo_timers::callback::Timeout;
use log::{error, info};
use notify::{mutation_notice, Notice, NoticeCounter, NoticeKind, NOTIFICATION_MS};
use stats::{summarize, year_options};
use std::cell::RefCell;
use std::rc::Rc;
use storage::BrowserStorage;
use store::{GameStore, LoadOutcome};
use theme::Theme;
use tier::Tier;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use yew::prelude::*;

const SEARCH_DEBOUNCE_MS: u32 = 300;
const TITLE_CLICK_WINDOW_MS: u32 = 600;

type SharedStore = Rc<RefCell<GameStore<BrowserStorage>>>;

#[derive(PartialEq, Clone, Copy)]
enum FetchStatus {
    Loading,
    Ready,
}

#[derive(PartialEq, Clone, Copy)]
enum Panel {
    Closed,
    Filters,
    Stats,
}

#[derive(PartialEq, Clone)]
enum Modal {
    Closed,
    Game(String),
    Form {
        original: Option<String>,
        draft: GameDraft,
    },
    Login,
    Compare,
}

#[derive(Clone)]
struct BoardCallbacks {
    on_open: Callback<String>,
    on_drag_start: Callback<(web_sys::DragEvent, String)>,
    on_drag_end: Callback<()>,
    on_drag_over: Callback<(web_sys::DragEvent, Tier)>,
    on_drag_leave: Callback<()>,
    on_drop: Callback<(web_sys::DragEvent, String)>,
    on_focus: Callback<Tier>,
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn sync_view(store: &SharedStore, games: &UseStateHandle<Vec<Game>>) {
    games.set(store.borrow().games().to_vec());
}

#[function_component(App)]
fn app() -> Html {
    let store: SharedStore = use_mut_ref(|| GameStore::empty(BrowserStorage));
    let games = use_state(Vec::<Game>::new);
    let status = use_state(|| FetchStatus::Loading);
    let detail_id = use_state(query_id);
    let favorites = use_state(|| Favorites::load(&BrowserStorage));
    let criteria = use_state(FilterCriteria::default);
    let search_text = use_state(String::new);
    let year_input = use_state(String::new);
    let tier_input = use_state(String::new);
    let search_timer = use_mut_ref(|| None::<Timeout>);
    let is_admin = use_state(|| false);
    let drag = use_mut_ref(DragFlow::default);
    let drag_over = use_state(|| None::<Tier>);
    let modal = use_state(|| Modal::Closed);
    let panel = use_state(|| Panel::Closed);
    let focus = use_state(|| None::<Tier>);
    let compare_mode = use_state(|| false);
    let selection = use_state(Selection::default);
    let theme = use_state(|| Theme::load(&BrowserStorage));
    let password = use_state(String::new);
    let login_error = use_state(|| None::<String>);
    let title_clicks = use_mut_ref(|| (0u32, None::<Timeout>));
    let notice = use_state(|| None::<Notice>);
    let notice_counter = use_mut_ref(NoticeCounter::default);
    let notice_timer = use_mut_ref(|| None::<Timeout>);

    let notify = {
        let notice = notice.clone();
        let notice_counter = notice_counter.clone();
        let notice_timer = notice_timer.clone();
        Callback::from(move |(kind, message): (NoticeKind, String)| {
            let next = notice_counter.borrow_mut().next(kind, message);
            notice.set(Some(next));
            let notice = notice.clone();
            *notice_timer.borrow_mut() = Some(Timeout::new(NOTIFICATION_MS, move || {
                notice.set(None);
            }));
        })
    };

    {
        let store = store.clone();
        let games = games.clone();
        let status = status.clone();
        let is_admin = is_admin.clone();
        let notify = notify.clone();

        use_effect_with_deps(
            move |_| {
                if restore_session(&BrowserStorage, now_ms()) {
                    is_admin.set(true);
                }

                spawn_local(async move {
                    let (loaded, outcome) = GameStore::load(BrowserStorage).await;
                    *store.borrow_mut() = loaded;
                    sync_view(&store, &games);
                    status.set(FetchStatus::Ready);

                    match outcome {
                        LoadOutcome::Persisted(_) | LoadOutcome::Seeded(_) => {
                            notify.emit((NoticeKind::Success, "Tier list loaded".to_owned()));
                        }
                        LoadOutcome::Failed(err) => {
                            error!("Could not load games: {}", err);
                            notify.emit((NoticeKind::Error, format!("Could not load games: {}", err)));
                        }
                    }
                });

                || ()
            },
            (),
        );
    }

    {
        let theme = *theme;
        use_effect_with_deps(
            move |theme: &Theme| {
                if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
                    let _ = body
                        .class_list()
                        .toggle_with_force("dark-theme", *theme == Theme::Dark);
                }
                || ()
            },
            theme,
        );
    }

    {
        let games = games.clone();
        let favorites = favorites.clone();
        let notify = notify.clone();
        use_effect_with_deps(
            move |criteria: &FilterCriteria| {
                if !criteria.is_empty() {
                    let count = filter_games(&games, criteria, &favorites.names()).len();
                    let plural = if count == 1 { "" } else { "s" };
                    notify.emit((NoticeKind::Info, format!("{} game{} found", count, plural)));
                }
                || ()
            },
            (*criteria).clone(),
        );
    }

    let on_search_input = {
        let search_text = search_text.clone();
        let search_timer = search_timer.clone();
        let year_input = year_input.clone();
        let tier_input = tier_input.clone();
        let criteria = criteria.clone();
        Callback::from(move |event: web_sys::InputEvent| {
            let text = event_value(&event).unwrap_or_default();
            search_text.set(text.clone());
            let next = FilterCriteria {
                favorites_only: criteria.favorites_only,
                ..FilterCriteria::from_inputs(&text, &year_input, &tier_input)
            };
            let criteria = criteria.clone();
            *search_timer.borrow_mut() = Some(Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                criteria.set(next);
            }));
        })
    };

    let on_year_change = {
        let year_input = year_input.clone();
        Callback::from(move |event: web_sys::Event| {
            year_input.set(event_value(&event).unwrap_or_default());
        })
    };

    let on_tier_change = {
        let tier_input = tier_input.clone();
        Callback::from(move |event: web_sys::Event| {
            tier_input.set(event_value(&event).unwrap_or_default());
        })
    };

    let apply_filters = {
        let criteria = criteria.clone();
        let search_text = search_text.clone();
        let year_input = year_input.clone();
        let tier_input = tier_input.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            criteria.set(FilterCriteria {
                favorites_only: criteria.favorites_only,
                ..FilterCriteria::from_inputs(&search_text, &year_input, &tier_input)
            });
        })
    };

    let reset_filters = {
        let criteria = criteria.clone();
        let search_text = search_text.clone();
        let year_input = year_input.clone();
        let tier_input = tier_input.clone();
        let search_timer = search_timer.clone();
        let notify = notify.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            search_timer.borrow_mut().take();
            search_text.set(String::new());
            year_input.set(String::new());
            tier_input.set(String::new());
            criteria.set(FilterCriteria::default());
            notify.emit((NoticeKind::Info, "Filters reset".to_owned()));
        })
    };

    let toggle_favorites_filter = {
        let criteria = criteria.clone();
        let notify = notify.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            let favorites_only = !criteria.favorites_only;
            criteria.set(FilterCriteria {
                favorites_only,
                ..(*criteria).clone()
            });
            let message = if favorites_only {
                "Favorites filter on"
            } else {
                "Favorites filter off"
            };
            notify.emit((NoticeKind::Info, message.to_owned()));
        })
    };

    let toggle_panel = |target: Panel| {
        let panel = panel.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            panel.set(if *panel == target { Panel::Closed } else { target });
        })
    };

    let toggle_theme = {
        let theme = theme.clone();
        let notify = notify.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            let next = theme.toggled();
            next.save(&BrowserStorage);
            theme.set(next);
            let message = match next {
                Theme::Dark => "Dark theme on",
                Theme::Light => "Light theme on",
            };
            notify.emit((NoticeKind::Info, message.to_owned()));
        })
    };

    let on_title_click = {
        let title_clicks = title_clicks.clone();
        let is_admin = is_admin.clone();
        let modal = modal.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            let mut clicks = title_clicks.borrow_mut();
            clicks.0 += 1;
            if clicks.0 == 1 {
                let reset = title_clicks.clone();
                clicks.1 = Some(Timeout::new(TITLE_CLICK_WINDOW_MS, move || {
                    reset.borrow_mut().0 = 0;
                }));
            } else if clicks.0 >= 3 {
                *clicks = (0, None);
                if !*is_admin {
                    modal.set(Modal::Login);
                }
            }
        })
    };

    let toggle_compare = {
        let compare_mode = compare_mode.clone();
        let selection = selection.clone();
        let modal = modal.clone();
        let notify = notify.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            let enabled = !*compare_mode;
            compare_mode.set(enabled);
            selection.set(Selection::default());
            if *modal == Modal::Compare {
                modal.set(Modal::Closed);
            }
            let message = if enabled {
                format!("Comparison mode on: pick {} games", COMPARE_LIMIT)
            } else {
                "Comparison mode off".to_owned()
            };
            notify.emit((NoticeKind::Info, message));
        })
    };

    let close_compare = {
        let selection = selection.clone();
        let modal = modal.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            selection.set(Selection::default());
            modal.set(Modal::Closed);
        })
    };

    let on_random = {
        let store = store.clone();
        let modal = modal.clone();
        let notify = notify.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            let store = store.borrow();
            match surprise_me(store.games()) {
                Some(game) => {
                    modal.set(Modal::Game(game.name.clone()));
                    notify.emit((NoticeKind::Info, format!("Random pick: {}", game.name)));
                }
                None => notify.emit((NoticeKind::Warning, "No games to show".to_owned())),
            }
        })
    };

    let on_export = {
        let store = store.clone();
        let notify = notify.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            let filename = export_filename(chrono::Local::now().date_naive());
            let result = export_json(store.borrow().games())
                .map_err(|err| err.to_string())
                .and_then(|text| {
                    download_json(&filename, &text).map_err(|err| format!("{:?}", err))
                });
            match result {
                Ok(()) => notify.emit((NoticeKind::Success, format!("Exported {}", filename))),
                Err(err) => {
                    error!("Export failed: {}", err);
                    notify.emit((NoticeKind::Error, "Export failed".to_owned()));
                }
            }
        })
    };

    let on_logout = {
        let is_admin = is_admin.clone();
        let notify = notify.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            logout(&BrowserStorage);
            is_admin.set(false);
            notify.emit((NoticeKind::Info, "Logged out".to_owned()));
        })
    };

    let open_add = {
        let modal = modal.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            modal.set(Modal::Form {
                original: None,
                draft: GameDraft {
                    rank: Tier::NotPlayed.code().to_owned(),
                    ..GameDraft::default()
                },
            });
        })
    };

    let close_modal = {
        let modal = modal.clone();
        let login_error = login_error.clone();
        let password = password.clone();
        Callback::from(move |_: web_sys::MouseEvent| {
            modal.set(Modal::Closed);
            login_error.set(None);
            password.set(String::new());
        })
    };

    let board = BoardCallbacks {
        on_open: {
            let modal = modal.clone();
            let compare_mode = compare_mode.clone();
            let selection = selection.clone();
            let notify = notify.clone();
            Callback::from(move |name: String| {
                if !*compare_mode {
                    modal.set(Modal::Game(name));
                    return;
                }
                let mut next = (*selection).clone();
                match next.toggle(&name) {
                    Pick::Full => notify.emit((
                        NoticeKind::Warning,
                        format!("At most {} games can be compared", COMPARE_LIMIT),
                    )),
                    Pick::Added if next.is_complete() => modal.set(Modal::Compare),
                    Pick::Added | Pick::Removed => {}
                }
                selection.set(next);
            })
        },
        on_drag_start: {
            let drag = drag.clone();
            let is_admin = is_admin.clone();
            Callback::from(move |(event, name): (web_sys::DragEvent, String)| {
                if !*is_admin {
                    event.prevent_default();
                    return;
                }
                if let Some(transfer) = event.data_transfer() {
                    transfer.set_effect_allowed("move");
                    let _ = transfer.set_data("text/plain", &name);
                }
                drag.borrow_mut().start(&name);
            })
        },
        on_drag_end: {
            let drag = drag.clone();
            let drag_over = drag_over.clone();
            Callback::from(move |_| {
                drag.borrow_mut().cancel();
                drag_over.set(None);
            })
        },
        on_drag_over: {
            let drag = drag.clone();
            let drag_over = drag_over.clone();
            Callback::from(move |(event, tier): (web_sys::DragEvent, Tier)| {
                if drag.borrow().dragged().is_none() {
                    return;
                }
                event.prevent_default();
                if let Some(transfer) = event.data_transfer() {
                    transfer.set_drop_effect("move");
                }
                if *drag_over != Some(tier) {
                    drag_over.set(Some(tier));
                }
            })
        },
        on_drag_leave: {
            let drag_over = drag_over.clone();
            Callback::from(move |_| drag_over.set(None))
        },
        on_drop: {
            let drag = drag.clone();
            let drag_over = drag_over.clone();
            let store = store.clone();
            let games = games.clone();
            let notify = notify.clone();
            Callback::from(move |(event, zone): (web_sys::DragEvent, String)| {
                event.prevent_default();
                drag_over.set(None);
                let result = drag.borrow_mut().drop_on(&zone, &mut store.borrow_mut());
                match result {
                    Ok(Some(change)) => {
                        info!("{} moved from {} to {}", change.name, change.from, change.to);
                        sync_view(&store, &games);
                        let success = format!("{} → Tier {}", change.name, change.to);
                        notify.emit(mutation_notice(&Ok(change.persistence), &success));
                    }
                    Ok(None) => {}
                    Err(err) => notify.emit((NoticeKind::Error, err.to_string())),
                }
            })
        },
        on_focus: {
            let focus = focus.clone();
            let notify = notify.clone();
            Callback::from(move |tier: Tier| {
                if focus.is_some() {
                    focus.set(None);
                    notify.emit((NoticeKind::Info, "Focus mode off".to_owned()));
                } else {
                    focus.set(Some(tier));
                    notify.emit((NoticeKind::Success, format!("Focus on tier {}", tier)));
                }
            })
        },
    };

    let on_toggle_favorite = {
        let favorites = favorites.clone();
        let store = store.clone();
        let notify = notify.clone();
        Callback::from(move |name: String| {
            let store = store.borrow();
            let Some(game) = store.get(&name) else {
                return;
            };
            let mut next = (*favorites).clone();
            let message = if next.toggle(&BrowserStorage, game) {
                format!("{} added to favorites", name)
            } else {
                format!("{} removed from favorites", name)
            };
            favorites.set(next);
            notify.emit((NoticeKind::Success, message));
        })
    };

    let on_edit = {
        let modal = modal.clone();
        let store = store.clone();
        Callback::from(move |name: String| {
            if let Some(game) = store.borrow().get(&name) {
                modal.set(Modal::Form {
                    original: Some(name.clone()),
                    draft: GameDraft::from_game(game),
                });
            }
        })
    };

    let on_draft_change = {
        let modal = modal.clone();
        Callback::from(move |update: DraftField| {
            if let Modal::Form { original, draft } = &*modal {
                let mut draft = draft.clone();
                update.apply(&mut draft);
                modal.set(Modal::Form {
                    original: original.clone(),
                    draft,
                });
            }
        })
    };

    let on_form_submit = {
        let modal = modal.clone();
        let store = store.clone();
        let games = games.clone();
        let notify = notify.clone();
        Callback::from(move |event: web_sys::SubmitEvent| {
            event.prevent_default();
            let Modal::Form { original, draft } = (*modal).clone() else {
                return;
            };
            let game = match draft.into_game() {
                Ok(game) => game,
                Err(err) => {
                    notify.emit((NoticeKind::Error, err.to_string()));
                    return;
                }
            };
            let (result, success) = match &original {
                Some(name) => (store.borrow_mut().update(name, game), "Game updated"),
                None => (store.borrow_mut().add(game), "Game added"),
            };
            notify.emit(mutation_notice(&result, success));
            if result.is_ok() {
                sync_view(&store, &games);
                modal.set(Modal::Closed);
            }
        })
    };

    let on_delete = {
        let modal = modal.clone();
        let store = store.clone();
        let games = games.clone();
        let notify = notify.clone();
        Callback::from(move |name: String| {
            let confirmed = window()
                .and_then(|w| {
                    w.confirm_with_message(&format!("Delete \"{}\"?", name))
                        .ok()
                })
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let result = store.borrow_mut().remove(&name);
            notify.emit(mutation_notice(&result, "Game deleted"));
            if result.is_ok() {
                sync_view(&store, &games);
                modal.set(Modal::Closed);
            }
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |event: web_sys::InputEvent| {
            password.set(event_value(&event).unwrap_or_default());
        })
    };

    let on_login = {
        let password = password.clone();
        let login_error = login_error.clone();
        let is_admin = is_admin.clone();
        let modal = modal.clone();
        let notify = notify.clone();
        Callback::from(move |event: web_sys::SubmitEvent| {
            event.prevent_default();
            match AdminGate::default().login(&BrowserStorage, &password, now_ms()) {
                Ok(_) => {
                    is_admin.set(true);
                    modal.set(Modal::Closed);
                    login_error.set(None);
                    password.set(String::new());
                    notify.emit((NoticeKind::Success, "Edit mode enabled".to_owned()));
                }
                Err(err) => login_error.set(Some(err.to_string())),
            }
        })
    };

    if let Some(id) = &*detail_id {
        return match *status {
            FetchStatus::Loading => html! { <p class="loading">{ "Loading…" }</p> },
            FetchStatus::Ready => {
                let game = find_by_id(&games, Some(id)).cloned();
                html! { <DetailView game={game} /> }
            }
        };
    }

    let favorite_names = favorites.names();
    let visible = filter_games(&games, &criteria, &favorite_names);

    let board_markup = match *status {
        FetchStatus::Loading => html! { <p class="loading">{ "Loading tier list…" }</p> },
        FetchStatus::Ready => html! {
            <div class="tier-list" id="tierList">
                { for Tier::ALL.into_iter().filter(|tier| focus.map_or(true, |f| f == *tier)).map(|tier| {
                    let row: Vec<&Game> = visible.iter().copied().filter(|game| game.rank == tier).collect();
                    render_tier_row(tier, &row, *is_admin, *drag_over == Some(tier), focus.is_some(), &selection, &board)
                }) }
            </div>
        },
    };

    let panel_markup = match *panel {
        Panel::Closed => html! {},
        Panel::Filters => render_filter_panel(
            &search_text,
            &year_input,
            &tier_input,
            &year_options(&games),
            on_search_input,
            on_year_change,
            on_tier_change,
            apply_filters,
            reset_filters,
        ),
        Panel::Stats => render_stats_panel(&games),
    };

    let modal_markup = match &*modal {
        Modal::Closed => html! {},
        Modal::Game(name) => match games.iter().find(|game| &game.name == name) {
            Some(game) => render_game_modal(
                game,
                &games,
                favorites.contains(&game.name),
                *is_admin,
                close_modal.clone(),
                on_toggle_favorite,
                on_edit,
            ),
            None => html! {},
        },
        Modal::Form { original, draft } => render_form_modal(
            original.as_deref(),
            draft,
            close_modal.clone(),
            on_draft_change,
            on_form_submit,
            on_delete,
        ),
        Modal::Compare => render_compare_modal(&selection.resolve(&games), close_compare),
        Modal::Login => render_login_modal(
            &password,
            (*login_error).clone(),
            close_modal.clone(),
            on_password_input,
            on_login,
        ),
    };

    let notice_markup = match &*notice {
        Some(notice) => html! {
            <div key={notice.id} class={classes!("notification", notice.kind.class())}>
                { &notice.message }
            </div>
        },
        None => html! {},
    };

    html! {
        <div class={classes!("app-container", (*is_admin).then_some("admin-mode"), (*compare_mode).then_some("comparison-mode"))}>
            <header class="header">
                <h1 id="mainTitle" onclick={on_title_click}>{ "Game of the Year Tier List" }</h1>
                <div class="header-controls">
                    <button class="icon-btn" title="Filters" onclick={toggle_panel(Panel::Filters)}>{ "🔍" }</button>
                    <button class="icon-btn" title="Statistics" onclick={toggle_panel(Panel::Stats)}>{ "📊" }</button>
                    <button class="icon-btn" title="Random game" onclick={on_random}>{ "🎲" }</button>
                    <button class={classes!("icon-btn", (*compare_mode).then_some("active"))} id="compareBtn" title="Compare two games" onclick={toggle_compare}>{ "⚖️" }</button>
                    <button class="icon-btn" id="favoritesBtn" title="Show favorites" onclick={toggle_favorites_filter}>
                        { if criteria.favorites_only { "❤️" } else { "🤍" } }
                    </button>
                    <button class="icon-btn" id="themeToggle" onclick={toggle_theme}>{ theme.icon() }</button>
                </div>
                {
                    if *is_admin {
                        html! {
                            <div class="admin-controls" id="adminControls">
                                <span class="admin-badge">{ "Edit mode" }</span>
                                <button onclick={open_add}>{ "Add game" }</button>
                                <button onclick={on_export}>{ "Export" }</button>
                                <button onclick={on_logout}>{ "Log out" }</button>
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
            </header>
            { panel_markup }
            <main class="content">
                { board_markup }
            </main>
            { modal_markup }
            { notice_markup }
        </div>
    }
}

fn render_tier_row(
    tier: Tier,
    games: &[&Game],
    is_admin: bool,
    highlighted: bool,
    focused: bool,
    compared: &Selection,
    board: &BoardCallbacks,
) -> Html {
    let zone = tier.zone_id();
    let code = tier.code().to_lowercase();

    let on_label_click = {
        let on_focus = board.on_focus.clone();
        Callback::from(move |_: web_sys::MouseEvent| on_focus.emit(tier))
    };
    let on_drag_over = {
        let on_drag_over = board.on_drag_over.clone();
        Callback::from(move |event: web_sys::DragEvent| on_drag_over.emit((event, tier)))
    };
    let on_drag_leave = {
        let on_drag_leave = board.on_drag_leave.clone();
        Callback::from(move |_: web_sys::DragEvent| on_drag_leave.emit(()))
    };
    let on_drop = {
        let on_drop = board.on_drop.clone();
        let zone = zone.clone();
        Callback::from(move |event: web_sys::DragEvent| on_drop.emit((event, zone.clone())))
    };

    html! {
        <div key={tier.code()} class={classes!("tier-row", highlighted.then_some("drag-over"), focused.then_some("focus-mode"))}>
            <div class={classes!("tier-label", format!("tier-{}", code))}
                title="Click to focus this tier"
                onclick={on_label_click}>
                { tier.code() }
            </div>
            <div class="tier-games" id={zone}
                ondragover={on_drag_over}
                ondragleave={on_drag_leave}
                ondrop={on_drop}>
                { for games.iter().map(|game| render_game_card(game, is_admin, compared.contains(&game.name), board)) }
            </div>
        </div>
    }
}

fn render_game_card(game: &Game, is_admin: bool, compared: bool, board: &BoardCallbacks) -> Html {
    let on_click = {
        let on_open = board.on_open.clone();
        let name = game.name.clone();
        Callback::from(move |_: web_sys::MouseEvent| on_open.emit(name.clone()))
    };
    let on_drag_start = {
        let on_drag_start = board.on_drag_start.clone();
        let name = game.name.clone();
        Callback::from(move |event: web_sys::DragEvent| on_drag_start.emit((event, name.clone())))
    };
    let on_drag_end = {
        let on_drag_end = board.on_drag_end.clone();
        Callback::from(move |_: web_sys::DragEvent| on_drag_end.emit(()))
    };

    html! {
        <div key={game.name.clone()} class={classes!("game-item", compared.then_some("comparison-selected"))}
            draggable={if is_admin { "true" } else { "false" }}
            onclick={on_click}
            ondragstart={on_drag_start}
            ondragend={on_drag_end}>
            <img src={game.picture_url()} alt={game.name.clone()} onerror={fallback_picture()} />
        </div>
    }
}

fn render_filter_panel(
    search_text: &str,
    year_input: &str,
    tier_input: &str,
    years: &[i32],
    on_search_input: Callback<web_sys::InputEvent>,
    on_year_change: Callback<web_sys::Event>,
    on_tier_change: Callback<web_sys::Event>,
    on_apply: Callback<web_sys::MouseEvent>,
    on_reset: Callback<web_sys::MouseEvent>,
) -> Html {
    html! {
        <section class="panel filter-panel" id="filterPanel">
            <input id="searchInput" type="search" placeholder="Search a game…"
                value={search_text.to_owned()} oninput={on_search_input} />
            <select id="yearFilter" onchange={on_year_change}>
                <option value="" selected={year_input.is_empty()}>{ "All years" }</option>
                { for years.iter().map(|year| {
                    let value = year.to_string();
                    let selected = value == year_input;
                    html! { <option value={value.clone()} selected={selected}>{ value }</option> }
                }) }
            </select>
            <select id="tierFilter" onchange={on_tier_change}>
                <option value="" selected={tier_input.is_empty()}>{ "All tiers" }</option>
                { for Tier::ALL.into_iter().map(|tier| {
                    let selected = tier.code() == tier_input;
                    html! { <option value={tier.code()} selected={selected}>{ format!("Tier {}", tier) }</option> }
                }) }
            </select>
            <button id="applyFilters" onclick={on_apply}>{ "Apply" }</button>
            <button id="resetFilters" onclick={on_reset}>{ "Reset" }</button>
        </section>
    }
}

fn render_stats_panel(games: &[Game]) -> Html {
    let summary = summarize(games);
    let latest_year = summary
        .latest_year
        .map(|year| year.to_string())
        .unwrap_or_else(|| "-".to_owned());
    let latest_game = match (&summary.latest_game, summary.latest_year) {
        (Some(name), Some(year)) => format!("{} ({})", name, year),
        _ => "-".to_owned(),
    };

    html! {
        <section class="panel stats-panel" id="statsPanel">
            <div class="stat"><span>{ "Games" }</span><strong>{ summary.total }</strong></div>
            <div class="stat"><span>{ "Latest year" }</span><strong>{ latest_year }</strong></div>
            <div class="stat"><span>{ "Latest game" }</span><strong>{ latest_game }</strong></div>
            <div class="tier-distribution" id="tierDistributionChart">
                { for summary.distribution.iter().map(|share| {
                    let plural = if share.count == 1 { "" } else { "s" };
                    html! {
                        <div class="tier-distribution-bar-container">
                            <div class="tier-info">
                                <span class="tier-label-small" style={format!("color: {}", share.tier.color())}>
                                    { format!("Tier {}", share.tier) }
                                </span>
                                <span class="tier-stats">
                                    { format!("{} game{} ({}%)", share.count, plural, share.percent) }
                                </span>
                            </div>
                            <div class="tier-bar-background">
                                <div class="tier-bar"
                                    style={format!("width: {}%; background: {};", share.percent, share.tier.color())}>
                                </div>
                            </div>
                        </div>
                    }
                }) }
            </div>
        </section>
    }
}

fn render_game_modal(
    game: &Game,
    games: &[Game],
    is_favorite: bool,
    is_admin: bool,
    on_close: Callback<web_sys::MouseEvent>,
    on_toggle_favorite: Callback<String>,
    on_edit: Callback<String>,
) -> Html {
    let stop_click = Callback::from(|event: web_sys::MouseEvent| event.stop_propagation());
    let favorite_click = {
        let name = game.name.clone();
        Callback::from(move |_: web_sys::MouseEvent| on_toggle_favorite.emit(name.clone()))
    };
    let edit_click = {
        let name = game.name.clone();
        Callback::from(move |_: web_sys::MouseEvent| on_edit.emit(name.clone()))
    };
    let href = detail_href(games, &game.name).unwrap_or_else(|| "?".to_owned());

    html! {
        <div class="modal" id="gameModal" onclick={on_close.clone()}>
            <div class="modal-content" onclick={stop_click}>
                <button class="close-modal" onclick={on_close}>{ "×" }</button>
                <img class="modal-image" src={game.picture_url()} alt={game.name.clone()} onerror={fallback_picture()} />
                <h2 class="modal-title">{ &game.name }</h2>
                <p class="modal-year">{ format!("📅 {}", game.year) }</p>
                <p class="modal-tier">{ format!("🏆 Tier {}", game.rank) }</p>
                <p class="modal-review">{ &game.review }</p>
                <div class="modal-actions">
                    <button id="toggleFavorite" onclick={favorite_click}>
                        { if is_favorite { "❤️ Remove from favorites" } else { "🤍 Add to favorites" } }
                    </button>
                    <a class="detail-link" href={href}>{ "Open page" }</a>
                    {
                        if is_admin {
                            html! { <button id="modalEditBtn" onclick={edit_click}>{ "Edit" }</button> }
                        } else {
                            html! {}
                        }
                    }
                </div>
            </div>
        </div>
    }
}

fn render_compare_modal(games: &[&Game], on_close: Callback<web_sys::MouseEvent>) -> Html {
    let stop_click = Callback::from(|event: web_sys::MouseEvent| event.stop_propagation());

    html! {
        <div class="modal" id="comparisonModal" onclick={on_close.clone()}>
            <div class="modal-content comparison-content" onclick={stop_click}>
                <button class="close-modal" onclick={on_close}>{ "×" }</button>
                <h2>{ "Comparison" }</h2>
                <div class="comparison-container" id="comparisonContainer">
                    { for games.iter().map(|game| html! {
                        <div key={game.name.clone()} class="comparison-game">
                            <img src={game.picture_url()} alt={game.name.clone()} onerror={fallback_picture()} />
                            <h3>{ &game.name }</h3>
                            <p>{ format!("📅 {}", game.year) }</p>
                            <p>{ format!("🏆 Tier {}", game.rank) }</p>
                            <div class="comparison-review">{ &game.review }</div>
                        </div>
                    }) }
                </div>
            </div>
        </div>
    }
}

enum DraftField {
    Name(String),
    Year(String),
    Rank(String),
    Picture(String),
    Review(String),
}

impl DraftField {
    fn apply(self, draft: &mut GameDraft) {
        match self {
            DraftField::Name(value) => draft.name = value,
            DraftField::Year(value) => draft.year = value,
            DraftField::Rank(value) => draft.rank = value,
            DraftField::Picture(value) => draft.picture = value,
            DraftField::Review(value) => draft.review = value,
        }
    }
}

fn render_form_modal(
    original: Option<&str>,
    draft: &GameDraft,
    on_close: Callback<web_sys::MouseEvent>,
    on_change: Callback<DraftField>,
    on_submit: Callback<web_sys::SubmitEvent>,
    on_delete: Callback<String>,
) -> Html {
    let field = |wrap: fn(String) -> DraftField| {
        let on_change = on_change.clone();
        Callback::from(move |event: web_sys::Event| {
            on_change.emit(wrap(event_value(&event).unwrap_or_default()));
        })
    };
    let on_input = |wrap: fn(String) -> DraftField| {
        let on_change = on_change.clone();
        Callback::from(move |event: web_sys::InputEvent| {
            on_change.emit(wrap(event_value(&event).unwrap_or_default()));
        })
    };
    let title = if original.is_some() { "Edit game" } else { "Add a game" };
    let delete_button = match original {
        Some(name) => {
            let name = name.to_owned();
            let on_click = Callback::from(move |_: web_sys::MouseEvent| on_delete.emit(name.clone()));
            html! { <button type="button" id="deleteGameBtn" class="danger" onclick={on_click}>{ "Delete" }</button> }
        }
        None => html! {},
    };

    html! {
        <div class="modal" id="addGameModal">
            <div class="modal-content">
                <button class="close-modal" onclick={on_close.clone()}>{ "×" }</button>
                <h2 id="addGameModalTitle">{ title }</h2>
                <form id="addGameForm" onsubmit={on_submit}>
                    <label>{ "Name" }
                        <input id="gameName" required=true value={draft.name.clone()} oninput={on_input(DraftField::Name)} />
                    </label>
                    <label>{ "Year" }
                        <input id="gameYear" type="number" required=true value={draft.year.clone()} oninput={on_input(DraftField::Year)} />
                    </label>
                    <label>{ "Tier" }
                        <select id="gameRank" onchange={field(DraftField::Rank)}>
                            { for Tier::ALL.into_iter().map(|tier| {
                                let selected = tier.code() == draft.rank;
                                html! { <option value={tier.code()} selected={selected}>{ tier.code() }</option> }
                            }) }
                        </select>
                    </label>
                    <label>{ "Picture" }
                        <input id="gamePicture" value={draft.picture.clone()} oninput={on_input(DraftField::Picture)} />
                    </label>
                    <label>{ "Review" }
                        <textarea id="gameReview" value={draft.review.clone()} oninput={on_input(DraftField::Review)} />
                    </label>
                    <div class="form-actions">
                        <button type="submit">{ "Save" }</button>
                        <button type="button" id="cancelAddGame" onclick={on_close}>{ "Cancel" }</button>
                        { delete_button }
                    </div>
                </form>
            </div>
        </div>
    }
}

fn render_login_modal(
    password: &str,
    login_error: Option<String>,
    on_close: Callback<web_sys::MouseEvent>,
    on_input: Callback<web_sys::InputEvent>,
    on_submit: Callback<web_sys::SubmitEvent>,
) -> Html {
    html! {
        <div class="modal" id="loginModal">
            <div class="modal-content">
                <button class="close-modal" id="closeLogin" onclick={on_close.clone()}>{ "×" }</button>
                <h2>{ "Edit mode" }</h2>
                <form id="loginForm" onsubmit={on_submit}>
                    <input id="loginPassword" type="password" placeholder="Password"
                        value={password.to_owned()} oninput={on_input} />
                    {
                        match login_error {
                            Some(message) => html! { <div id="loginError" class="login-error show">{ message }</div> },
                            None => html! {},
                        }
                    }
                    <div class="form-actions">
                        <button type="submit">{ "Log in" }</button>
                        <button type="button" id="cancelLogin" onclick={on_close}>{ "Cancel" }</button>
                    </div>
                </form>
            </div>
        </div>
    }
}

fn event_value(event: &web_sys::Event) -> Option<String> {
    let target = event.target()?;
    if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = target.dyn_ref::<web_sys::HtmlSelectElement>() {
        return Some(select.value());
    }
    target
        .dyn_ref::<web_sys::HtmlTextAreaElement>()
        .map(|area| area.value())
}

fn download_json(filename: &str, text: &str) -> Result<(), JsValue> {
    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let link: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(&url);
    link.set_download(filename);
    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;
    web_sys::Url::revoke_object_url(&url)
}

#[wasm_bindgen(start)]
pub fn run_app() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
