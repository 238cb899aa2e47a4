use url::Url;

/// `BitID` sign-in request: `bitid://host/path?x=<nonce>[&u=1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitIdRequest {
    /// The URI as scanned. This is the message that gets signed.
    pub full_uri: String,
    /// Server nonce (`x`)
    pub nonce: String,
    /// Where the signed response is posted
    pub callback: Url,
    /// `false` when the server asked for plain HTTP (`u=1`)
    pub is_secure: bool,
}

impl BitIdRequest {
    /// Parse a `bitid:` URI.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let uri = Url::parse(text).ok()?;
        if uri.scheme() != "bitid" {
            return None;
        }
        let host = uri.host_str().filter(|host| !host.is_empty())?;

        let mut nonce = None;
        let mut is_secure = true;
        for (key, value) in uri.query_pairs() {
            match key.as_ref() {
                "x" => nonce = Some(value.into_owned()),
                "u" => is_secure = value != "1",
                _ => {}
            }
        }
        let nonce = nonce.filter(|nonce| !nonce.is_empty())?;

        let scheme = if is_secure { "https" } else { "http" };
        let port = uri.port().map(|port| format!(":{port}")).unwrap_or_default();
        let callback = Url::parse(&format!("{scheme}://{host}{port}{}", uri.path())).ok()?;

        Some(Self {
            full_uri: text.to_string(),
            nonce,
            callback,
            is_secure,
        })
    }
}
