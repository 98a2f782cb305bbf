//! Built-in numeric functions
//!
//! Every function takes one operand in radians (trigonometry) or plain
//! units and enforces its own input domain:
//!
//! | function | domain |
//! |----------|--------|
//! | `sin`, `cos`, `tan`, `atan` | any real |
//! | `asin`, `acos` | `[-1, 1]` |
//! | `sqrt` | `>= 0` |
//! | `ln`, `log` (base 10) | `> 0` |

use crate::error::{ExprError, ExprResult};
use std::fmt;

/// One of the nine recognized unary functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Ln,
    Log,
}

impl Function {
    /// All recognized functions
    pub const ALL: [Function; 9] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Sqrt,
        Function::Ln,
        Function::Log,
    ];

    /// Look up a function by its exact (lowercase) name
    pub fn from_name(name: &str) -> Option<Function> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// The function's source-text name
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sqrt => "sqrt",
            Function::Ln => "ln",
            Function::Log => "log",
        }
    }

    /// Whether `operand` lies inside this function's input domain
    pub fn accepts(self, operand: f64) -> bool {
        match self {
            Function::Asin | Function::Acos => (-1.0..=1.0).contains(&operand),
            Function::Sqrt => operand >= 0.0,
            Function::Ln | Function::Log => operand > 0.0,
            Function::Sin | Function::Cos | Function::Tan | Function::Atan => true,
        }
    }

    /// Apply the function, failing with [`ExprError::Domain`] outside its domain
    pub fn apply(self, operand: f64) -> ExprResult<f64> {
        if !self.accepts(operand) {
            return Err(ExprError::Domain {
                function: self.name(),
                operand,
            });
        }

        Ok(match self {
            Function::Sin => operand.sin(),
            Function::Cos => operand.cos(),
            Function::Tan => operand.tan(),
            Function::Asin => operand.asin(),
            Function::Acos => operand.acos(),
            Function::Atan => operand.atan(),
            Function::Sqrt => operand.sqrt(),
            Function::Ln => operand.ln(),
            Function::Log => operand.log10(),
        })
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        for func in Function::ALL {
            assert_eq!(Function::from_name(func.name()), Some(func));
        }
        assert_eq!(Function::from_name("log10"), None);
        assert_eq!(Function::from_name("SIN"), None);
    }

    #[test]
    fn test_trigonometry() {
        assert_eq!(Function::Sin.apply(0.0).unwrap(), 0.0);
        assert_eq!(Function::Cos.apply(0.0).unwrap(), 1.0);
        assert!((Function::Atan.apply(1.0).unwrap() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert!((Function::Asin.apply(1.0).unwrap() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(Function::Acos.apply(1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_domain_errors() {
        assert!(matches!(
            Function::Sqrt.apply(-1.0),
            Err(ExprError::Domain { function: "sqrt", .. })
        ));
        assert!(Function::Ln.apply(0.0).is_err());
        assert!(Function::Log.apply(-5.0).is_err());
        assert!(Function::Asin.apply(1.0001).is_err());
        assert!(Function::Acos.apply(-2.0).is_err());
    }

    #[test]
    fn test_domain_boundaries() {
        assert_eq!(Function::Sqrt.apply(0.0).unwrap(), 0.0);
        assert_eq!(Function::Log.apply(100.0).unwrap(), 2.0);
        assert_eq!(Function::Ln.apply(1.0).unwrap(), 0.0);
        assert!(Function::Asin.apply(-1.0).is_ok());
    }
}
