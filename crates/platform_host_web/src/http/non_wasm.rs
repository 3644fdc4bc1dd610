use super::{HttpRequest, HttpResponse};

pub(super) async fn send(request: HttpRequest<'_>) -> Result<HttpResponse, String> {
    Err(format!(
        "{} {} failed: fetch is only available in the browser",
        request.method.as_str(),
        request.url
    ))
}
