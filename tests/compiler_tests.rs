use echidna_replay::compiler::{compile, Step};
use echidna_replay::parser::parse_trace;
use echidna_replay::utils::ReplayConfig;
use pretty_assertions::assert_eq;

const TRACE: &str = "       PropertiesMain.integrityOfDepositCapLP() from: 0x0000000000000000000000000000000000010000 Time delay: 73640 seconds Block delay: 4797
    *wait* Time delay: 55653 seconds Block delay: 13556
    PropertiesMain.randDepositMP((19, 45, 48, 28, 91, 31, 39, 83, 4, 31, 194, 75556710804409716572161, true),57,39,45,5,51340885865410570674416158866210557407) from: 0x0000000000000000000000000000000000010000 Time delay: 69942 seconds Block delay: 6125
    PropertiesMain.randATokenNonRebasingApproveLP((244, 205, 46, 57, 7, 230, 64, 197, 252, 188, 81, 93, false),68,129,1,169182917653354964098321622043809906643) from: 0x0000000000000000000000000000000000010000
";

const EXPECTED: &str = r#"// SPDX-License-Identifier: MIT
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

    function testCallSequence() public {
        propertiesMain.integrityOfDepositCapLP(); skip(73640);
        skip(55653);
        propertiesMain.randDepositMP(PropertiesBase.LocalVars_UPTL(19, 45, 48, 28, 91, 31, 39, 83, 4, 31, 194, 75556710804409716572161, true),57,39,45,5,51340885865410570674416158866210557407); skip(69942);
        propertiesMain.randATokenNonRebasingApproveLP(PropertiesBase.LocalVars_UPTL(244, 205, 46, 57, 7, 230, 64, 197, 252, 188, 81, 93, false),68,129,1,169182917653354964098321622043809906643);
    }
}
"#;

#[test]
fn test_full_program_rendering() {
    let config = ReplayConfig::default();
    let trace = parse_trace(TRACE, &config).unwrap();
    let program = compile(trace.events(), &config);

    assert_eq!(program.render(), EXPECTED);
}

#[test]
fn test_compilation_is_deterministic() {
    let config = ReplayConfig::default();
    let trace = parse_trace(TRACE, &config).unwrap();

    let first = compile(trace.events(), &config).render();
    let second = compile(trace.events(), &config).render();
    assert_eq!(first, second);
}

#[test]
fn test_n_calls_give_n_invocations_between_one_header_and_footer() {
    let config = ReplayConfig::default();
    let input = "PropertiesMain.a()\nPropertiesMain.b(1)\nPropertiesMain.c((1, true))\n";
    let trace = parse_trace(input, &config).unwrap();
    let program = compile(trace.events(), &config);

    assert_eq!(program.invocation_count(), 3);
    assert_eq!(program.statements.len(), 3);

    let rendered = program.render();
    assert_eq!(rendered.matches("contract FoundryTestSequence").count(), 1);
    assert_eq!(rendered.matches("function testCallSequence()").count(), 1);
    assert!(rendered.ends_with("    }\n}\n"));

    let a = rendered.find("propertiesMain.a();").unwrap();
    let b = rendered.find("propertiesMain.b(1);").unwrap();
    let c = rendered
        .find("propertiesMain.c(PropertiesBase.LocalVars_UPTL(1, true));")
        .unwrap();
    assert!(a < b && b < c);
}

#[test]
fn test_whitespace_only_trace_has_empty_body() {
    let config = ReplayConfig::default();
    let trace = parse_trace("\n   \n\t\t\n", &config).unwrap();
    let program = compile(trace.events(), &config);

    assert!(program.statements.is_empty());
    assert!(program
        .render()
        .contains("    function testCallSequence() public {\n    }\n}\n"));
}

#[test]
fn test_end_to_end_scenario() {
    let config = ReplayConfig::default();
    let trace = parse_trace(
        "PropertiesMain.foo(1,2,true) from: 0xABC Time delay: 10\n*wait* Time delay: 5\n",
        &config,
    )
    .unwrap();
    let program = compile(trace.events(), &config);

    assert_eq!(program.statements.len(), 2);
    assert_eq!(
        program.statements[0].steps,
        vec![
            Step::Invoke {
                receiver: "propertiesMain".to_string(),
                function: "foo".to_string(),
                arguments: "PropertiesBase.LocalVars_UPTL(1,2,true)".to_string(),
            },
            Step::AdvanceTime {
                function: "skip".to_string(),
                seconds: 10,
            },
        ]
    );
    assert_eq!(
        program.statements[1].steps,
        vec![Step::AdvanceTime {
            function: "skip".to_string(),
            seconds: 5,
        }]
    );
}

#[test]
fn test_custom_config_names() {
    let config = ReplayConfig::from_toml_str(
        r#"
        call_prefix = "Harness."
        receiver = "harness"
        target_contract = "Harness"
        advance_function = "advance"
        struct_wrapper = "Params"
        "#,
    )
    .unwrap();
    let trace = parse_trace("Harness.go((1, true)) Time delay: 2 seconds", &config).unwrap();
    let rendered = compile(trace.events(), &config).render();

    assert!(rendered.contains("        harness.go(Params(1, true)); advance(2);"));
    assert!(rendered.contains("    Harness public harness;"));
}
