use log::warn;
use serde::Deserialize;
use web_sys::Document;

/// Id of the optional `<script type="application/json">` block holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "enhance-config";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub navbar_selector: String,
    pub scrolled_class: String,
    pub scrolled_after_px: f64,

    pub section_selector: String,
    pub nav_link_selector: String,
    pub active_class: String,
    pub section_offset_px: f64,

    pub menu_button_selector: String,
    pub nav_menu_selector: String,
    pub menu_open_body_class: String,

    pub anchor_selector: String,

    pub fade_in_selector: String,
    pub visible_class: String,
    pub stats_selector: String,
    pub poll_interval_ms: f64,
    pub poll_threshold: f64,
    pub observer_threshold: f64,

    pub hero_selector: String,
    pub float_selector: String,
    pub parallax_shift: f64,
    pub parallax_base_deg: f64,
    pub parallax_deg_per_px: f64,

    pub stat_number_selector: String,
    pub counter_duration_ms: u32,
    pub counter_steps: u32,

    pub purchase_selector: String,
    pub placeholder_notice: String,

    pub loaded_class: String,
    pub hero_fade_in_selector: String,
    pub reveal_delay_ms: u32,
    pub reveal_stagger_ms: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            navbar_selector: ".navbar".to_string(),
            scrolled_class: "scrolled".to_string(),
            scrolled_after_px: 50.0,

            section_selector: "section[id]".to_string(),
            nav_link_selector: ".nav-menu a".to_string(),
            active_class: "active".to_string(),
            section_offset_px: 100.0,

            menu_button_selector: ".mobile-menu-btn".to_string(),
            nav_menu_selector: ".nav-menu".to_string(),
            menu_open_body_class: "menu-open".to_string(),

            anchor_selector: "a[href^=\"#\"]".to_string(),

            fade_in_selector: ".fade-in".to_string(),
            visible_class: "visible".to_string(),
            stats_selector: ".solution-stats".to_string(),
            poll_interval_ms: 100.0,
            poll_threshold: 0.2,
            observer_threshold: 0.1,

            hero_selector: ".hero".to_string(),
            float_selector: ".product-float".to_string(),
            parallax_shift: 0.3,
            parallax_base_deg: -5.0,
            parallax_deg_per_px: 0.02,

            stat_number_selector: ".stat-number".to_string(),
            counter_duration_ms: 1500,
            counter_steps: 50,

            purchase_selector: ".btn-purchase, .nav-cta".to_string(),
            placeholder_notice: "쇼핑몰 링크가 곧 연결됩니다.".to_string(),

            loaded_class: "loaded".to_string(),
            hero_fade_in_selector: ".hero .fade-in".to_string(),
            reveal_delay_ms: 100,
            reveal_stagger_ms: 150,
        }
    }
}

impl PageConfig {
    /// Parses overrides; unknown keys are ignored and missing ones keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn load(document: &Document) -> Self {
        let raw = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());

        let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
            return Self::default();
        };
        Self::from_json(&raw).unwrap_or_else(|e| {
            warn!("Ignoring malformed #{} block: {}", CONFIG_ELEMENT_ID, e);
            Self::default()
        })
    }
}
