#![warn(clippy::all, rust_2018_idioms)]
//! Re-number the `[IMG<n>]` region blocks of a .til file from typed `x,y,w,h` lines.
//!
//! The parsing and regeneration functions are plain and synchronous; [`RegionEditorApp`]
//! is the eframe front end that feeds them from a file picker and a text box.

mod app;
mod coordinates;
#[cfg(target_arch = "wasm32")]
mod file_picker;
mod markers;
mod regenerate;
mod session;

pub use app::RegionEditorApp;
pub use coordinates::{CoordinateLine, parse_coordinate_lines};
pub use markers::analyze;
pub use regenerate::{RegenerateError, extract_preamble, regenerate, render};
pub use session::{
    RawDocument, SUPPORTED_EXTENSIONS, Session, SessionError, is_supported_file_name,
};

use eframe::NativeOptions;

#[cfg(target_os = "android")]
use egui_winit::winit;

impl RegionEditorApp {
    /// Run the app with provided NativeOptions (used by the native and Android entrypoints).
    pub fn run(options: NativeOptions) -> Result<(), eframe::Error> {
        eframe::run_native(
            "TIL Region Editor",
            options,
            Box::new(|cc| Ok(Box::new(RegionEditorApp::new(cc)))),
        )
    }
}

#[cfg(target_os = "android")]
#[expect(unsafe_code)]
#[unsafe(no_mangle)]
pub extern "C" fn android_main(app: winit::platform::android::activity::AndroidApp) {
    use eframe::Renderer;

    unsafe {
        std::env::set_var("RUST_BACKTRACE", "full");
    }
    android_logger::init_once(
        android_logger::Config::default().with_max_level(log::LevelFilter::Info),
    );

    let options = NativeOptions {
        android_app: Some(app),
        renderer: Renderer::Wgpu,
        ..Default::default()
    };

    if let Err(e) = RegionEditorApp::run(options) {
        log::error!("app exited with error: {e}");
    }
}
