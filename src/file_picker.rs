// Browser file selection (wasm only). We create a hidden <input type=file> and read the
// chosen file's bytes with a FileReader; native builds use rfd::FileDialog and read from disk.

use crate::session::{SUPPORTED_EXTENSIONS, SessionError, is_supported_file_name};
use js_sys::Uint8Array;
use once_cell::sync::Lazy;
use std::sync::Mutex;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{FileReader, HtmlInputElement};

/// A file chosen in the browser, read in full.
#[derive(Debug)]
pub struct PickedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

type Pick = Result<PickedFile, SessionError>;

static PICKED: Lazy<Mutex<Option<Pick>>> = Lazy::new(|| Mutex::new(None));

fn deliver(pick: Pick) {
    if let Ok(mut slot) = PICKED.lock() {
        *slot = Some(pick);
    }
}

fn read_failed(name: String) -> SessionError {
    SessionError::FileRead {
        name,
        source: std::io::Error::other("the browser could not read the file"),
    }
}

pub fn open_file_picker() {
    log::debug!("file_picker: opening browser file dialog");
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(input) = document
        .create_element("input")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };

    let accept: Vec<String> = SUPPORTED_EXTENSIONS.iter().map(|e| format!(".{e}")).collect();
    input.set_type("file");
    input.set_accept(&accept.join(","));
    // Off-screen instead of display:none; some browsers block clicks on hidden inputs.
    let _ = input.set_attribute(
        "style",
        "position: fixed; left: -9999px; width: 1px; height: 1px; opacity: 0;",
    );
    if let Some(body) = document.body() {
        let _ = body.append_child(&input);
    }

    let onchange = Closure::wrap(Box::new(move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
            return;
        };
        input.remove();
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let name = file.name();
        // The accept filter is only a hint; check again before reading anything.
        if !is_supported_file_name(&name) {
            deliver(Err(SessionError::UnsupportedFileType { name }));
            return;
        }
        let Ok(reader) = FileReader::new() else {
            deliver(Err(read_failed(name)));
            return;
        };

        let loaded = reader.clone();
        let loaded_name = name.clone();
        let onload = Closure::once(Box::new(move |_e: JsValue| match loaded.result() {
            Ok(buffer) => {
                let bytes = Uint8Array::new(&buffer).to_vec();
                deliver(Ok(PickedFile {
                    name: loaded_name,
                    bytes,
                }));
            }
            Err(_) => deliver(Err(read_failed(loaded_name))),
        }) as Box<dyn FnOnce(_)>);
        let onerror = Closure::once(Box::new(move |_e: JsValue| {
            deliver(Err(read_failed(name)));
        }) as Box<dyn FnOnce(_)>);

        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();
        let _ = reader.read_as_array_buffer(&file);
    }) as Box<dyn FnMut(_)>);

    input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
    onchange.forget(); // keep alive

    input.click();
}

/// The outcome of the last browser pick, if one finished since the previous call.
pub fn take_picked_file() -> Option<Pick> {
    PICKED.lock().ok().and_then(|mut slot| slot.take())
}
