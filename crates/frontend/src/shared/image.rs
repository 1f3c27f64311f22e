//! Image upload: size check and reading a `File` into a data URL.
//!
//! The inventory core only ever sees the finished string.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// Reject files above the configured limit before reading them
pub fn check_image_size(size_bytes: u64, max_bytes: u64) -> Result<(), String> {
    if size_bytes > max_bytes {
        return Err(format!(
            "Image is too large: {:.1} MB (limit {:.1} MB)",
            size_bytes as f64 / (1024.0 * 1024.0),
            max_bytes as f64 / (1024.0 * 1024.0)
        ));
    }
    Ok(())
}

/// Extract the first selected file from an `<input type="file">` change event
pub fn selected_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    ev.target()?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()?
        .files()?
        .get(0)
}

type DoneCallback = Box<dyn FnOnce(Result<String, String>)>;

/// Completion shared by the reader callback and the start-up error path.
/// Whichever finishes first runs the callback; later calls do nothing.
#[derive(Clone)]
struct Completion(Rc<RefCell<Option<DoneCallback>>>);

impl Completion {
    fn new(on_done: impl FnOnce(Result<String, String>) + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(on_done)))))
    }

    fn finish(&self, result: Result<String, String>) {
        let callback = self.0.borrow_mut().take();
        if let Some(callback) = callback {
            callback(result);
        }
    }
}

/// Read `file` as a data URL and hand the result to `on_done`.
/// `on_done` runs exactly once, also when the read cannot start.
pub fn read_as_data_url(
    file: web_sys::File,
    max_bytes: u64,
    on_done: impl FnOnce(Result<String, String>) + 'static,
) {
    if let Err(e) = check_image_size(file.size() as u64, max_bytes) {
        on_done(Err(e));
        return;
    }

    let reader = match web_sys::FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            log::error!("FileReader is not available: {:?}", e);
            on_done(Err("Image upload is not supported".to_string()));
            return;
        }
    };

    let completion = Completion::new(on_done);
    let reader_for_load = reader.clone();
    let completion_for_load = completion.clone();
    let onloadend = Closure::once(move |_: JsValue| {
        let result = reader_for_load
            .result()
            .ok()
            .and_then(|value| value.as_string())
            .ok_or_else(|| "Failed to read image".to_string());
        completion_for_load.finish(result);
    });
    reader.set_onloadend(Some(onloadend.as_ref().unchecked_ref()));
    // The reader owns the callback until it fires
    onloadend.forget();

    if let Err(e) = reader.read_as_data_url(&file) {
        log::error!("failed to start image read: {:?}", e);
        reader.set_onloadend(None);
        completion.finish(Err("Failed to read image".to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_limit() {
        let limit = 5 * 1024 * 1024;
        assert!(check_image_size(1024, limit).is_ok());
        assert!(check_image_size(limit, limit).is_ok());
        let err = check_image_size(limit + 1, limit).unwrap_err();
        assert!(err.contains("limit 5.0 MB"));
    }

    #[test]
    fn test_completion_runs_callback_once() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let completion = Completion::new(move |result| sink.borrow_mut().push(result));

        completion.clone().finish(Err("Failed to read image".to_string()));
        completion.finish(Ok("data:image/png;base64,AA==".to_string()));

        assert_eq!(
            *calls.borrow(),
            vec![Err::<String, String>("Failed to read image".to_string())]
        );
    }
}
