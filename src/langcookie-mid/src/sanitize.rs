/// Restricts a raw cookie value to lowercase ascii alphanumerics, dashes and underscores.
/// Uppercase ascii letters are lowered first; every other character is dropped.
pub fn sanitize_key<S>(input: S) -> String
where
  S: AsRef<str>,
{
  input
    .as_ref()
    .chars()
    .map(|character| character.to_ascii_lowercase())
    .filter(|character| matches!(character, 'a'..='z' | '0'..='9' | '-' | '_'))
    .collect()
}
