/// Encode ordered parameters as an `application/x-www-form-urlencoded` string.
///
/// The same encoding is used for GET query strings and POST bodies.
pub fn encode_form_data(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Parse URL-encoded form data into ordered key-value pairs
pub fn parse_form_data(data: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();

    for pair in data.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            let key = key.replace('+', " ");
            let value = value.replace('+', " ");
            let decoded_key = urlencoding::decode(&key)
                .map(|k| k.into_owned())
                .unwrap_or_else(|_| key.clone());
            let decoded_value = urlencoding::decode(&value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.clone());
            params.push((decoded_key, decoded_value));
        } else if !pair.is_empty() {
            params.push((pair.to_string(), String::new()));
        }
    }

    params
}
