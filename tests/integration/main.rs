#![cfg(feature = "builtin-modules")]

#[macro_use]
mod macros;
mod runner;

integration_test_cases!(
    "tests/integration/cases",
    case_001_double_scalar => "001_double_scalar",
    case_002_processor_controls => "002_processor_controls",
    case_003_tuple_and_mapping => "003_tuple_and_mapping",
    case_004_loss_terms => "004_loss_terms",
    case_005_legacy_input_alias => "005_legacy_input_alias",
    case_006_inline_overrides_named => "006_inline_overrides_named",
    case_007_shadowed_node => "007_shadowed_node",
    case_008_toml_graph => "008_toml_graph",
    case_009_json_map_nodes => "009_json_map_nodes",
    case_010_missing_key => "010_missing_key",
    case_011_unknown_module => "011_unknown_module",
    case_012_arity_mismatch => "012_arity_mismatch",
    case_013_module_failure => "013_module_failure",
    case_014_aliases_disabled => "014_aliases_disabled",
);
