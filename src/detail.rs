use crate::data::{game_ids, Game, PLACEHOLDER_PICTURE};
use crate::tier::Tier;
use yew::prelude::*;

pub const ID_PARAM: &str = "id";

pub fn find_by_id<'a>(games: &'a [Game], id: Option<&str>) -> Option<&'a Game> {
    let id = id?.trim();
    game_ids(games)
        .iter()
        .position(|candidate| candidate == id)
        .map(|index| &games[index])
}

pub fn detail_href(games: &[Game], name: &str) -> Option<String> {
    let index = games.iter().position(|game| game.name == name)?;
    game_ids(games)
        .into_iter()
        .nth(index)
        .map(|id| format!("?{}={}", ID_PARAM, id))
}

pub fn query_id() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search)
        .ok()?
        .get(ID_PARAM)
}

#[derive(Properties, PartialEq)]
pub struct DetailProps {
    pub game: Option<Game>,
}

#[function_component(DetailView)]
pub fn detail_view(props: &DetailProps) -> Html {
    let Some(game) = &props.game else {
        return html! {
            <div id="game-detail" class="game-detail missing">
                <p>{ "Game not found." }</p>
                <a href="?">{ "Back to the tier list" }</a>
            </div>
        };
    };

    let rank_label = match game.rank {
        Tier::NotPlayed => "Not played".to_string(),
        tier => format!("Tier {}", tier),
    };

    html! {
        <div id="game-detail" class="game-detail">
            <img src={game.picture_url()} alt={game.name.clone()} onerror={fallback_picture()} />
            <div class="game-meta">
                <h2>{ &game.name }</h2>
                <div class="game-year">{ game.year }</div>
                <div class="game-rank">{ rank_label }</div>
                <div class="review">{ &game.review }</div>
                <a href="?">{ "Back to the tier list" }</a>
            </div>
        </div>
    }
}

pub fn fallback_picture() -> Callback<Event> {
    Callback::from(|event: Event| {
        if let Some(img) = event.target_dyn_into::<web_sys::HtmlImageElement>() {
            if !img.src().ends_with(PLACEHOLDER_PICTURE) {
                img.set_src(PLACEHOLDER_PICTURE);
            }
        }
    })
}
