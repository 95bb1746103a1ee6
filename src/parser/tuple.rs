//! Tuple normalization.
//!
//! Echidna prints struct arguments as bare tuples, e.g.
//! `(19, 45, 48, true)`. Solidity needs an explicit struct constructor, so
//! the struct-shaped group is rewritten to `Wrapper(19, 45, 48, true)`.
//! Detection is purely structural (integers followed by one trailing bool);
//! there is no ABI to consult.

use super::line::parse_arguments_text;
use super::schema::{is_struct_signature, Argument, ArgumentToken, CallEvent, Scalar};
use log::{debug, warn};

/// Rewrite the arguments of a parsed call
///
/// # Arguments
/// * `call` - Parsed call whose argument spans index `arguments_text`
/// * `wrapper` - Struct constructor, e.g. `PropertiesBase.LocalVars_UPTL`
/// * `wrap_flat` - Also wrap a whole flat argument list with the struct signature
///
/// # Returns
/// Argument text with at most one group wrapped; spacing and values untouched
pub fn normalize_arguments(call: &CallEvent, wrapper: &str, wrap_flat: bool) -> String {
    rewrite(&call.arguments_text, &call.arguments, wrapper, wrap_flat)
}

/// Rewrite raw argument text (the contents of a call's parentheses)
///
/// Text that does not parse as an argument list is returned unchanged.
pub fn normalize_tuple(arguments_text: &str, wrapper: &str) -> String {
    match parse_arguments_text(arguments_text) {
        Ok(arguments) => rewrite(arguments_text, &arguments, wrapper, true),
        Err(reason) => {
            debug!("Leaving argument text as is ({}): {}", reason, arguments_text);
            arguments_text.to_string()
        }
    }
}

fn rewrite(text: &str, arguments: &[Argument], wrapper: &str, wrap_flat: bool) -> String {
    let mut groups = arguments
        .iter()
        .enumerate()
        .filter(|(_, argument)| argument.token.is_struct_shaped());

    if let Some((index, group)) = groups.next() {
        if index != 0 {
            warn!("Struct argument at position {} instead of first: {}", index, text);
        }
        if groups.next().is_some() {
            warn!("More than one struct argument, only the first is wrapped: {}", text);
        }
        return format!(
            "{}{}{}",
            &text[..group.start],
            wrapper,
            &text[group.start..]
        );
    }

    if wrap_flat && is_flat_struct(arguments) {
        return format!("{}({})", wrapper, text);
    }

    text.to_string()
}

/// True when [`normalize_arguments`] wraps part or all of this call's arguments
pub fn wraps_struct(call: &CallEvent, wrap_flat: bool) -> bool {
    call.arguments
        .iter()
        .any(|argument| argument.token.is_struct_shaped())
        || (wrap_flat && is_flat_struct(&call.arguments))
}

/// Whole argument list is scalars with the struct signature
fn is_flat_struct(arguments: &[Argument]) -> bool {
    let scalars: Option<Vec<Scalar>> = arguments
        .iter()
        .map(|argument| match &argument.token {
            ArgumentToken::Scalar(scalar) => Some(scalar.clone()),
            ArgumentToken::Tuple(_) => None,
        })
        .collect();

    scalars.is_some_and(|scalars| is_struct_signature(&scalars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WRAPPER: &str = "WRAPPER";

    #[test]
    fn test_nested_tuple_is_wrapped() {
        assert_eq!(
            normalize_tuple("(1, 2, 3, true)", WRAPPER),
            "WRAPPER(1, 2, 3, true)"
        );
    }

    #[test]
    fn test_tuple_without_bool_is_left_alone() {
        assert_eq!(normalize_tuple("(1,2)", WRAPPER), "(1,2)");
    }

    #[test]
    fn test_tuple_keeps_following_arguments() {
        assert_eq!(
            normalize_tuple("(51, 10, 94, false),251,5,133,false", WRAPPER),
            "WRAPPER(51, 10, 94, false),251,5,133,false"
        );
    }

    #[test]
    fn test_flat_struct_list_is_wrapped() {
        assert_eq!(normalize_tuple("1,2,true", WRAPPER), "WRAPPER(1,2,true)");
    }

    #[test]
    fn test_flat_wrapping_can_be_disabled() {
        let arguments = parse_arguments_text("1,2,true").unwrap();
        let call = CallEvent {
            function_name: "foo".to_string(),
            arguments,
            arguments_text: "1,2,true".to_string(),
            caller: None,
            delay_seconds: None,
            block_delay: None,
        };
        assert_eq!(normalize_arguments(&call, WRAPPER, false), "1,2,true");
        assert_eq!(normalize_arguments(&call, WRAPPER, true), "WRAPPER(1,2,true)");
    }

    #[test]
    fn test_plain_arguments_pass_through() {
        assert_eq!(normalize_tuple("", WRAPPER), "");
        assert_eq!(normalize_tuple("5, 6", WRAPPER), "5, 6");
        assert_eq!(normalize_tuple("true", WRAPPER), "true");
        assert_eq!(normalize_tuple("0xABC, true", WRAPPER), "0xABC, true");
    }

    #[test]
    fn test_only_first_struct_is_wrapped() {
        assert_eq!(
            normalize_tuple("(1, true),(2, false)", WRAPPER),
            "WRAPPER(1, true),(2, false)"
        );
    }

    #[test]
    fn test_non_leading_struct_is_wrapped() {
        assert_eq!(
            normalize_tuple("7, (1, true)", WRAPPER),
            "7, WRAPPER(1, true)"
        );
    }

    #[test]
    fn test_unparseable_text_is_unchanged() {
        assert_eq!(normalize_tuple("(1, 2", WRAPPER), "(1, 2");
    }
}
