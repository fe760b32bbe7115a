//! OAuth 1.0a request signing (HMAC-SHA1), as required by the timeline API.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::application::ports::channel::ChannelError;

type HmacSha1 = Hmac<Sha1>;

#[derive(Clone)]
pub struct OAuth1Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

/// Per-request values that must be fresh for every call.
pub struct OAuth1Nonce<'a> {
    pub nonce: &'a str,
    pub timestamp: i64,
}

/// RFC 3986 percent-encoding: everything but `A-Z a-z 0-9 - . _ ~`.
fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Builds the `Authorization` header value for one request.
///
/// `params` holds query and form parameters that take part in the signature; a JSON
/// body does not.
pub fn authorization_header(
    credentials: &OAuth1Credentials,
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    fresh: &OAuth1Nonce<'_>,
) -> Result<String, ChannelError> {
    let timestamp = fresh.timestamp.to_string();
    let oauth_params = [
        ("oauth_consumer_key", credentials.consumer_key.as_str()),
        ("oauth_nonce", fresh.nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", credentials.token.as_str()),
        ("oauth_version", "1.0"),
    ];

    let mut encoded: Vec<(String, String)> = oauth_params
        .iter()
        .chain(params.iter())
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    encoded.sort();
    let parameter_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let base_string = format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(url),
        encode(&parameter_string)
    );
    let signing_key = format!(
        "{}&{}",
        encode(&credentials.consumer_secret),
        encode(&credentials.token_secret)
    );

    let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())
        .map_err(|err| ChannelError::Unexpected(format!("invalid signing key: {err}")))?;
    mac.update(base_string.as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());

    let mut header: Vec<(&str, String)> = oauth_params
        .iter()
        .map(|(k, v)| (*k, encode(v)))
        .chain(std::iter::once(("oauth_signature", encode(&signature))))
        .collect();
    header.sort_by_key(|(k, _)| *k);

    Ok(format!(
        "OAuth {}",
        header
            .iter()
            .map(|(k, v)| format!("{k}=\"{v}\""))
            .collect::<Vec<_>>()
            .join(", ")
    ))
}
