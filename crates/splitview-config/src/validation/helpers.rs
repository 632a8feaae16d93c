/// Record a problem when `value` falls outside `min..=max`.
pub(crate) fn validate_range<T>(problems: &mut Vec<String>, key: &str, value: T, min: T, max: T)
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if !(min..=max).contains(&value) {
        problems.push(format!("{key} = {value} is out of range [{min}, {max}]"));
    }
}
