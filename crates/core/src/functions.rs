// Built-in formula catalog
//
// Single source of truth for the function names the tokenizer, the
// highlighter and signature hints recognize.

use serde::Serialize;

use crate::variable::VarType;

/// Information about a built-in formula function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormulaDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub signature: &'static str,
    pub params: &'static [ParamInfo],
}

/// Parameter information for signature hints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamInfo {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub param_type: VarType,
}

const NUMBER_PAIR: &[ParamInfo] = &[
    ParamInfo { name: "number1", param_type: VarType::Number },
    ParamInfo { name: "number2", param_type: VarType::Number },
];

/// All supported functions, in catalog order
pub static FORMULAS: &[FormulaDescriptor] = &[
    FormulaDescriptor {
        name: "SUM",
        description: "Returns the sum of numbers.",
        signature: "SUM(number1, number2, ...)",
        params: NUMBER_PAIR,
    },
    FormulaDescriptor {
        name: "SUBTRACT",
        description: "Returns the difference of two numbers.",
        signature: "SUBTRACT(number1, number2)",
        params: NUMBER_PAIR,
    },
    FormulaDescriptor {
        name: "MULTIPLY",
        description: "Returns the product of two numbers.",
        signature: "MULTIPLY(number1, number2)",
        params: NUMBER_PAIR,
    },
    FormulaDescriptor {
        name: "DIVIDE",
        description: "Returns the quotient of two numbers.",
        signature: "DIVIDE(dividend, divisor)",
        params: &[
            ParamInfo { name: "dividend", param_type: VarType::Number },
            ParamInfo { name: "divisor", param_type: VarType::Number },
        ],
    },
    FormulaDescriptor {
        name: "MIN",
        description: "Returns the smallest value from a set of numbers.",
        signature: "MIN(number1, number2, ...)",
        params: NUMBER_PAIR,
    },
    FormulaDescriptor {
        name: "MAX",
        description: "Returns the largest value from a set of numbers.",
        signature: "MAX(number1, number2, ...)",
        params: NUMBER_PAIR,
    },
    FormulaDescriptor {
        name: "ABS",
        description: "Returns the absolute value of a number.",
        signature: "ABS(number)",
        params: &[ParamInfo { name: "number", param_type: VarType::Number }],
    },
    FormulaDescriptor {
        name: "ROUND",
        description: "Rounds a number to a specified number of digits.",
        signature: "ROUND(number, num_digits)",
        params: &[
            ParamInfo { name: "number", param_type: VarType::Number },
            ParamInfo { name: "num_digits", param_type: VarType::Number },
        ],
    },
];

/// Look up a function by exact (case-sensitive) name.
pub fn get_function(name: &str) -> Option<&'static FormulaDescriptor> {
    FORMULAS.iter().find(|f| f.name == name)
}

pub fn is_known_function(name: &str) -> bool {
    get_function(name).is_some()
}
