/// A computed request signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The exact string that was hashed, kept for diagnostics
    pub base_string: String,
    /// Lowercase hex MD5 digest of `base_string`, sent as `api_sig`
    pub api_sig: String,
}

/// Sign a parameter set the way the Last.fm web service verifies it.
///
/// Parameters are sorted by key, concatenated as `key0value0key1value1...`
/// without separators, followed by the shared secret. The UTF-8 bytes of that
/// string are hashed with MD5.
pub fn sign(params: &[(String, String)], secret: &str) -> Signature {
    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut base_string = String::new();
    for (key, value) in sorted {
        base_string.push_str(key);
        base_string.push_str(value);
    }
    base_string.push_str(secret);

    let digest = md5::compute(base_string.as_bytes());
    log::trace!("Signature base string has {} bytes", base_string.len());

    Signature {
        base_string,
        api_sig: format!("{digest:x}"),
    }
}
