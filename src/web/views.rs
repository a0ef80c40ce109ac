use super::prelude::*;
use crate::script::PanelDescription;
use crate::staging::RecentComic;
use crate::style::Style;

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub(crate) struct HomeTemplate {
    pub(crate) styles: Vec<Style>,
    pub(crate) has_recent: bool,
    pub(crate) recent: Vec<RecentComic>,
}

#[derive(Template, WebTemplate)]
#[template(path = "result.html")]
pub(crate) struct ResultTemplate {
    pub(crate) title: String,
    pub(crate) style_label: String,
    pub(crate) artifact_url: String,
    pub(crate) file_name: String,
    pub(crate) has_moral: bool,
    pub(crate) moral: String,
    pub(crate) panels: Vec<PanelDescription>,
}
