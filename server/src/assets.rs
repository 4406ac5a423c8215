use std::path::Path;

use rouille::{Request, Response};

/// Serves `request` from the directory `root` when its URL lies below
/// `prefix`, which is stripped before the file lookup.
///
/// Returns `None` for URLs outside the prefix. Inside the prefix, anything
/// that isn't a readable file below `root` is a 404.
pub fn serve(request: &Request, prefix: &str, root: &Path) -> Option<Response> {
    let url = request.url();
    if !url.strip_prefix(prefix)?.starts_with('/') {
        return None;
    }

    let request = request.remove_prefix(prefix)?;
    let response = rouille::match_assets(&request, root);
    match response.is_success() {
        true => Some(response),
        false => Some(Response::empty_404()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::path::PathBuf;

    use super::*;

    fn root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("static")
    }

    fn get(url: &str) -> Option<Response> {
        serve(&Request::fake_http("GET", url, vec![], vec![]), "/static", &root())
    }

    fn bytes(response: Response) -> Vec<u8> {
        let (mut reader, _) = response.data.into_reader_and_size();
        let mut data = vec![];
        reader.read_to_end(&mut data).unwrap();
        data
    }

    #[test]
    fn outside_prefix_is_ignored() {
        assert!(get("/").is_none());
        assert!(get("/projects").is_none());
        assert!(get("/staticfile.css").is_none());
    }

    #[test]
    fn serves_exact_bytes() {
        for file in ["css/site.css", "icons/zap.svg", "placeholder.svg"] {
            let response = get(&format!("/static/{file}")).unwrap();
            assert_eq!(response.status_code, 200, "{file}");
            assert_eq!(bytes(response), std::fs::read(root().join(file)).unwrap(), "{file}");
        }
    }

    #[test]
    fn missing_files_are_404() {
        assert_eq!(get("/static/nope.css").unwrap().status_code, 404);
        assert_eq!(get("/static/icons").unwrap().status_code, 404);
        assert_eq!(get("/static/../Cargo.toml").unwrap().status_code, 404);
    }
}
