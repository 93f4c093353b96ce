// Library root
// -----------
// The binary (`main.rs`) wires these modules into an interactive terminal
// portfolio.
//
// Module responsibilities:
// - `config`: environment-driven settings (feed location, account, watch mode).
// - `logging`: rotating file logs; the terminal belongs to the UI.
// - `api`: blocking HTTP client for the local feed and the GitHub listing.
// - `store`: key-value persistence for the theme preference.
// - `theme`: current theme, its palette and toggle controls.
// - `view`: the in-memory view model and its terminal/HTML projections.
// - `feed`: local feed polling, change detection and rendering.
// - `console`: the toy command registry and transcript.
// - `browser`: live repository list with language filter and search.
// - `ui`: the menus and raw-mode loops that drive everything above.
pub mod api;
pub mod browser;
pub mod config;
pub mod console;
pub mod feed;
pub mod logging;
pub mod store;
pub mod theme;
pub mod ui;
pub mod view;
