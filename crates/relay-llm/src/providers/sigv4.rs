//! AWS Signature Version 4 for JSON POST requests.

use crate::error::{LlmError, Result};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

pub(crate) const ALGORITHM: &str = "AWS4-HMAC-SHA256";
pub(crate) const CONTENT_TYPE: &str = "application/json";

pub(crate) struct SigningKeys<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
    pub session_token: Option<&'a str>,
}

/// Headers to attach to the signed request, in canonical order.
#[derive(Debug)]
pub(crate) struct SignedHeaders {
    pub headers: Vec<(&'static str, String)>,
    pub authorization: String,
}

/// Signs a POST of `body` to `https://{host}{encoded_path}`.
///
/// `encoded_path` is the path as it appears on the wire. AWS services other
/// than S3 expect each segment to be encoded once more in the canonical
/// request.
pub(crate) fn sign_post(
    keys: &SigningKeys<'_>,
    region: &str,
    service: &str,
    host: &str,
    encoded_path: &str,
    body: &[u8],
    now: DateTime<Utc>,
) -> Result<SignedHeaders> {
    let date_time = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date = &date_time[..8];

    let mut headers: Vec<(&'static str, String)> = vec![
        ("content-type", CONTENT_TYPE.to_string()),
        ("host", host.to_string()),
        ("x-amz-date", date_time.clone()),
    ];
    if let Some(token) = keys.session_token {
        headers.push(("x-amz-security-token", token.to_string()));
    }
    headers.sort_by_key(|(k, _)| *k);

    let canonical_headers: String = headers
        .iter()
        .map(|(k, v)| format!("{}:{}\n", k, v.trim()))
        .collect();
    let signed_headers = headers
        .iter()
        .map(|(k, _)| *k)
        .collect::<Vec<_>>()
        .join(";");

    let canonical_request = format!(
        "POST\n{}\n\n{}\n{}\n{}",
        urlencoded(encoded_path),
        canonical_headers,
        signed_headers,
        hex_sha256(body)
    );

    let credential_scope = format!("{}/{}/{}/aws4_request", date, region, service);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        date_time,
        credential_scope,
        hex_sha256(canonical_request.as_bytes())
    );

    let signing_key = derive_signing_key(keys.secret_access_key.as_bytes(), date, region, service)?;
    let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?);

    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, keys.access_key_id, credential_scope, signed_headers, signature
    );

    Ok(SignedHeaders {
        headers,
        authorization,
    })
}

pub(crate) fn hex_sha256(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| LlmError::InvalidRequest(format!("signing key rejected: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn derive_signing_key(secret: &[u8], date: &str, region: &str, service: &str) -> Result<Vec<u8>> {
    let k_secret = [b"AWS4", secret].concat();
    let k_date = hmac_sha256(&k_secret, date.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

/// Percent-encodes everything except unreserved characters and `/`.
pub(crate) fn urlencoded(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                out.push(b as char)
            }
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}
