/// Rewrite `?` placeholders to Postgres `$1..$n` and collapse whitespace so
/// queries can be written in the readable `?` style throughout the
/// repositories.
pub fn sql(query: &str) -> String {
    let cleaned = query.split_whitespace().collect::<Vec<&str>>().join(" ");
    let mut result = String::with_capacity(cleaned.len());
    let mut param_index = 0;
    for ch in cleaned.chars() {
        if ch == '?' {
            param_index += 1;
            result.push('$');
            result.push_str(&param_index.to_string());
        } else {
            result.push(ch);
        }
    }
    result
}
