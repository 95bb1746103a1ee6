//! Fixed header and footer of the generated test contract.

use crate::utils::config::ReplayConfig;

/// Lines preceding the first statement
///
/// License, pragma, imports, the contract under test, its constructor and
/// the opening of the test function.
pub fn header_lines(config: &ReplayConfig) -> Vec<String> {
    let mut lines = vec![
        format!("// SPDX-License-Identifier: {}", config.license),
        format!("pragma solidity {};", config.pragma),
        String::new(),
    ];

    lines.extend(
        config
            .imports
            .iter()
            .map(|path| format!("import \"{}\";", path)),
    );

    lines.extend([
        String::new(),
        format!("// cmd :: forge t --mt {} -vvvv", config.test_function),
        "/// @notice This is a foundry test contract to test failing properties echidna fuzzing found."
            .to_string(),
        format!(
            "contract {} is {} {{",
            config.contract_name, config.base_contract
        ),
        format!(
            "    {} public {};",
            config.target_contract, config.receiver
        ),
        String::new(),
        "    constructor() {".to_string(),
        format!(
            "        {} = new {}();",
            config.receiver, config.target_contract
        ),
        "    }".to_string(),
        String::new(),
        format!("    function {}() public {{", config.test_function),
    ]);

    lines
}

/// Lines following the last statement; the empty line yields a final newline
pub fn footer_lines() -> Vec<String> {
    vec!["    }".to_string(), "}".to_string(), String::new()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_header() {
        let header = header_lines(&ReplayConfig::default()).join("\n");
        let expected = r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.13;

import "../PropertiesMain.sol";
import "../PropertiesBase.sol";
import "forge-std/Test.sol";

// cmd :: forge t --mt testCallSequence -vvvv
/// @notice This is a foundry test contract to test failing properties echidna fuzzing found.
contract FoundryTestSequence is Test {
    PropertiesMain public propertiesMain;

    constructor() {
        propertiesMain = new PropertiesMain();
    }

    function testCallSequence() public {"#;
        assert_eq!(header, expected);
    }

    #[test]
    fn test_custom_names() {
        let config = ReplayConfig {
            contract_name: "Repro".to_string(),
            target_contract: "Harness".to_string(),
            receiver: "harness".to_string(),
            test_function: "testRepro".to_string(),
            imports: vec!["./Harness.sol".to_string()],
            ..Default::default()
        };
        let header = header_lines(&config);

        assert!(header.contains(&"import \"./Harness.sol\";".to_string()));
        assert!(header.contains(&"contract Repro is Test {".to_string()));
        assert!(header.contains(&"        harness = new Harness();".to_string()));
        assert_eq!(header.last().unwrap(), "    function testRepro() public {");
    }
}
