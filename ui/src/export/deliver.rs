//! Getting export bytes out of the app: clipboard, downloads/files and SVG
//! rasterization, with a browser and a native path for each.

use super::ExportError;

pub fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

pub async fn copy_to_clipboard(payload: String) -> Result<(), ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        let page = browser::Page::current()?;
        let textarea: web_sys::HtmlTextAreaElement = page.create("textarea")?;
        textarea.set_value(&payload);
        browser::hide(&textarea, &[("position", "fixed"), ("top", "0"), ("opacity", "0")]);

        let copied = page.while_attached(&textarea, |textarea| {
            textarea.select();
            page.document.exec_command("copy").unwrap_or(false)
        })?;
        if copied {
            Ok(())
        } else {
            Err(ExportError::Clipboard("copy command blocked".into()))
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|err| ExportError::Clipboard(err.to_string()))?;
        clipboard
            .set_text(payload)
            .map_err(|err| ExportError::Clipboard(err.to_string()))
    }
}

/// Browser: starts a download and returns `None`. Native: writes into the
/// app's export directory and returns the path.
pub async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        let page = browser::Page::current()?;
        let url = browser::ObjectUrl::from_bytes(&bytes, mime)?;
        let anchor: web_sys::HtmlAnchorElement = page.create("a")?;
        anchor.set_href(url.as_str());
        anchor.set_download(filename);
        browser::hide(&anchor, &[("display", "none")]);
        page.while_attached(&anchor, |anchor| anchor.click())?;
        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = mime;
        let path = export_path(filename)?;
        tokio::task::spawn_blocking(move || {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            std::fs::write(&path, &bytes)?;
            Ok::<_, ExportError>(path.to_string_lossy().into_owned())
        })
        .await
        .map_err(|err| ExportError::Io(std::io::Error::other(err)))?
        .map(Some)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn export_dir() -> Result<std::path::PathBuf, ExportError> {
    let dirs = directories::ProjectDirs::from("com", "WorkletDash", "WorkletDash")
        .ok_or(ExportError::NoExportDir)?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(not(target_arch = "wasm32"))]
fn export_path(filename: &str) -> Result<std::path::PathBuf, ExportError> {
    Ok(export_dir()?.join(filename))
}

/// SVG markup to PNG bytes. Natively the render runs on the blocking pool so
/// loading the font database never stalls the UI thread.
pub async fn rasterize(svg_markup: &str) -> Result<Vec<u8>, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        rasterize_web(svg_markup).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let markup = svg_markup.to_owned();
        tokio::task::spawn_blocking(move || rasterize_native(&markup))
            .await
            .map_err(|err| ExportError::Render(err.to_string()))?
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn rasterize_native(svg_markup: &str) -> Result<Vec<u8>, ExportError> {
    use std::sync::Arc;

    let mut fonts = usvg::fontdb::Database::new();
    fonts.load_system_fonts();
    let mut options = usvg::Options::default();
    options.fontdb = Arc::new(fonts);

    let tree = usvg::Tree::from_str(svg_markup, &options)
        .map_err(|err| ExportError::Render(err.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| ExportError::Render("snapshot has zero size".into()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|err| ExportError::Render(err.to_string()))
}

/// Draws the SVG onto an offscreen canvas and reads the PNG back out.
#[cfg(target_arch = "wasm32")]
async fn rasterize_web(svg_markup: &str) -> Result<Vec<u8>, ExportError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

    let page = browser::Page::current()?;
    let source = browser::ObjectUrl::from_bytes(svg_markup.as_bytes(), "image/svg+xml")?;

    let image = HtmlImageElement::new().map_err(|_| ExportError::Browser("no image element"))?;
    image.set_src(source.as_str());
    JsFuture::from(image.decode())
        .await
        .map_err(|_| ExportError::Browser("SVG snapshot failed to decode"))?;

    let canvas: HtmlCanvasElement = page.create("canvas")?;
    canvas.set_width(super::svg::WIDTH as u32);
    canvas.set_height(super::svg::HEIGHT as u32);
    let context = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|context| context.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or(ExportError::Browser("no 2d canvas context"))?;
    context
        .draw_image_with_html_image_element(&image, 0.0, 0.0)
        .map_err(|_| ExportError::Browser("SVG snapshot failed to draw"))?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| ExportError::Browser("canvas refused to encode"))?;
    png_from_data_url(&data_url)
}

/// Decodes the payload of a base64 `data:image/png` URL.
#[cfg(any(target_arch = "wasm32", test))]
fn png_from_data_url(data_url: &str) -> Result<Vec<u8>, ExportError> {
    use base64::Engine as _;

    let encoded = data_url
        .strip_prefix("data:image/png;base64,")
        .ok_or(ExportError::Browser("canvas did not return a PNG data URL"))?;
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|err| ExportError::Render(err.to_string()))
}

/// The DOM plumbing the browser paths share: a document handle, typed element
/// creation, temporary attachment and self-revoking object URLs.
#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::JsCast;
    use web_sys::{Blob, BlobPropertyBag, Document, HtmlElement, Url};

    use super::ExportError;

    pub struct Page {
        pub document: Document,
    }

    impl Page {
        pub fn current() -> Result<Self, ExportError> {
            web_sys::window()
                .and_then(|window| window.document())
                .map(|document| Self { document })
                .ok_or(ExportError::Browser("document unavailable"))
        }

        pub fn create<T: JsCast>(&self, tag: &'static str) -> Result<T, ExportError> {
            self.document
                .create_element(tag)
                .ok()
                .and_then(|element| element.dyn_into::<T>().ok())
                .ok_or(ExportError::Browser("unable to create element"))
        }

        /// Runs `with` while `element` sits in the body; it is removed again
        /// whatever `with` returns.
        pub fn while_attached<E, R>(
            &self,
            element: &E,
            with: impl FnOnce(&E) -> R,
        ) -> Result<R, ExportError>
        where
            E: AsRef<HtmlElement>,
        {
            let body = self
                .document
                .body()
                .ok_or(ExportError::Browser("missing body"))?;
            let node: &HtmlElement = element.as_ref();
            body.append_child(node)
                .map_err(|_| ExportError::Browser("unable to attach element"))?;
            let result = with(element);
            node.remove();
            Ok(result)
        }
    }

    pub fn hide<E: AsRef<HtmlElement>>(element: &E, rules: &[(&str, &str)]) {
        let style = element.as_ref().style();
        for (property, value) in rules {
            style.set_property(property, value).ok();
        }
    }

    /// A `blob:` URL, revoked when dropped.
    pub struct ObjectUrl(String);

    impl ObjectUrl {
        pub fn from_bytes(bytes: &[u8], mime: &str) -> Result<Self, ExportError> {
            let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
            let options = BlobPropertyBag::new();
            options.set_type(mime);
            let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                .map_err(|_| ExportError::Browser("failed to create blob"))?;
            Url::create_object_url_with_blob(&blob)
                .map(Self)
                .map_err(|_| ExportError::Browser("unable to create object URL"))
        }

        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl Drop for ObjectUrl {
        fn drop(&mut self) {
            Url::revoke_object_url(&self.0).ok();
        }
    }
}
