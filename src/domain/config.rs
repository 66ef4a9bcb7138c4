//! Typed configuration: what the page URL carries, and the render/loader constants.

use std::str::FromStr;

use crate::domain::axis::NumberFormat;
use crate::domain::clipping::SamplingConfig;
use crate::domain::dotplot::{Colors, Theme, ViewBox};
use crate::domain::errors::DotplotResult;

pub const KEY_VIEW_BOX: &str = "viewBox";
pub const KEY_COLORS: &str = "colors";
pub const KEY_THEME: &str = "theme";
pub const KEY_ID: &str = "id";
pub const KEY_ALIGNMENTS: &str = "alignments";
pub const KEY_FILENAME1: &str = "filename1";
pub const KEY_FILENAME2: &str = "filename2";
pub const KEY_FACTOR: &str = "factor";

/// State persisted in the query string.
///
/// Values that fail to parse are dropped in favour of the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlState {
    /// Seeds the current view at load.
    pub view_box: Option<ViewBox>,
    pub colors: Colors,
    pub theme: Theme,
    /// Job id: names the coordinate file and the detail view.
    pub id: Option<String>,
    pub alignments: Option<String>,
    pub filename1: Option<String>,
    pub filename2: Option<String>,
    /// Overview decimation factor, at least 1.
    pub factor: u32,
}

impl Default for UrlState {
    fn default() -> Self {
        Self {
            view_box: None,
            colors: Colors::default(),
            theme: Theme::Light,
            id: None,
            alignments: None,
            filename1: None,
            filename2: None,
            factor: 1,
        }
    }
}

impl UrlState {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut state = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                KEY_VIEW_BOX => {
                    state.view_box = serde_json::from_str::<ViewBox>(value)
                        .ok()
                        .filter(ViewBox::is_valid);
                }
                KEY_COLORS => {
                    state.colors = serde_json::from_str(value).unwrap_or_default();
                }
                KEY_THEME => state.theme = Theme::from_str(value).unwrap_or_default(),
                KEY_ID => state.id = non_empty(value),
                KEY_ALIGNMENTS => state.alignments = non_empty(value),
                KEY_FILENAME1 => state.filename1 = non_empty(value),
                KEY_FILENAME2 => state.filename2 = non_empty(value),
                KEY_FACTOR => {
                    state.factor = value.trim().parse::<u32>().ok().filter(|f| *f > 0).unwrap_or(1);
                }
                _ => {}
            }
        }
        state
    }

    /// Query pairs in a stable order. Absent text values are written empty.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(8);
        if let Some(json) = self.view_box.and_then(|vb| serde_json::to_string(&vb).ok()) {
            pairs.push((KEY_VIEW_BOX.to_string(), json));
        }
        if let Ok(json) = serde_json::to_string(&self.colors) {
            pairs.push((KEY_COLORS.to_string(), json));
        }
        pairs.push((KEY_THEME.to_string(), self.theme.to_string()));
        for (key, value) in [
            (KEY_ID, &self.id),
            (KEY_ALIGNMENTS, &self.alignments),
            (KEY_FILENAME1, &self.filename1),
            (KEY_FILENAME2, &self.filename2),
        ] {
            pairs.push((key.to_string(), value.clone().unwrap_or_default()));
        }
        if self.factor != 1 {
            pairs.push((KEY_FACTOR.to_string(), self.factor.to_string()));
        }
        pairs
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Where `UrlState` lives between page loads
pub trait StateStore {
    fn load(&self) -> UrlState;
    fn save(&self, state: &UrlState) -> DotplotResult<()>;
}

/// Layout and sampling constants for one plot
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub svg_size: f64,
    pub axis_margin: f64,
    pub sampling: SamplingConfig,
    pub number_format: NumberFormat,
    pub detail_url: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            svg_size: 800.0,
            axis_margin: 60.0,
            sampling: SamplingConfig::default(),
            number_format: NumberFormat::default(),
            detail_url: "https://bioinfo.univ-lille.fr/cgi-bin/yass/print_align-cgi".to_string(),
        }
    }
}

impl RenderConfig {
    /// Detail page for one segment of job `job_id`.
    pub fn detail_link(&self, job_id: &str, segment_id: u32) -> String {
        format!("{}?id={}&noLine={}", self.detail_url, job_id, segment_id)
    }
}

/// Where coordinate files are served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub base_path: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { base_path: "/yass/tmp".to_string() }
    }
}

impl LoaderConfig {
    pub fn coordinates_url(&self, job_id: &str) -> String {
        format!("{}/coordonnees.{}.txt", self.base_path.trim_end_matches('/'), job_id)
    }
}
