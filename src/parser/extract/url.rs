use crate::settings::Settings;

/// First link whose path ends in a firmware extension.
pub fn find_firmware_url<'a>(
    links: impl IntoIterator<Item = &'a str>,
    settings: &Settings,
) -> Option<&'a str> {
    links
        .into_iter()
        .find(|url| !url.is_empty() && settings.is_firmware_path(url_path(url)))
}

/// The URL with query string and fragment removed.
pub fn url_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}
