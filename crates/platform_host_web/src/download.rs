//! Blob download through a temporary object URL and a synthetic anchor click.

use platform_host::{AssetDownloadService, DownloadFuture};

#[derive(Debug, Clone, Copy, Default)]
/// Browser asset download service.
pub struct WebAssetDownloadService;

#[cfg(target_arch = "wasm32")]
async fn save_remote_asset(url: &str, file_name: &str) -> Result<(), String> {
    use wasm_bindgen::JsCast;
    use web_sys::{HtmlAnchorElement, Url};

    use crate::http::{fetch_blob, js_error_to_string};

    let blob = fetch_blob(url).await?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "document unavailable".to_string())?;
    let body = document
        .body()
        .ok_or_else(|| "document body unavailable".to_string())?;
    let object_url = Url::create_object_url_with_blob(&blob).map_err(js_error_to_string)?;

    let clicked = (|| -> Result<(), String> {
        let anchor = document
            .create_element("a")
            .map_err(js_error_to_string)?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| "created element is not an anchor".to_string())?;
        anchor.set_href(&object_url);
        anchor.set_download(file_name);
        body.append_child(&anchor).map_err(js_error_to_string)?;
        anchor.click();
        anchor.remove();
        Ok(())
    })();

    let _ = Url::revoke_object_url(&object_url);
    clicked
}

impl AssetDownloadService for WebAssetDownloadService {
    fn download<'a>(
        &'a self,
        url: &'a str,
        file_name: &'a str,
    ) -> DownloadFuture<'a, Result<(), String>> {
        #[cfg(target_arch = "wasm32")]
        {
            Box::pin(save_remote_asset(url, file_name))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Box::pin(async move {
                Err(format!(
                    "cannot save {file_name} from {url}: downloads are only available in the browser"
                ))
            })
        }
    }
}
