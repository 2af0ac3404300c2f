/// Serialize `pairs` as an `application/x-www-form-urlencoded` body.
///
/// Keys and values are percent-encoded the way browsers encode URI
/// components, so spaces become `%20`. Order is preserved.
pub fn encode_form<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding::encode(k.as_ref()),
                urlencoding::encode(v.as_ref())
            )
        })
        .collect::<Vec<String>>()
        .join("&")
}
