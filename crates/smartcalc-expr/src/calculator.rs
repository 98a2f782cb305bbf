//! Scalar expression pipeline
//!
//! raw text → [`preprocess`] → [`validate`] → [`to_postfix`] → [`evaluate`]
//! → two-decimal string, plus a graph sampled from the same expression with
//! the variable left free.

use crate::error::{ExprError, ExprResult};
use crate::evaluator::evaluate;
use crate::graph::{sample, GraphSeries, GraphWindow};
use crate::postfix::{to_postfix, Postfix};
use crate::preprocess::preprocess;
use crate::validator::{check_syntax, validate};
use log::debug;

/// A validated expression ready for evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    raw: String,
    substituted: String,
    postfix: Postfix,
    bound: Option<f64>,
}

impl Expression {
    /// Preprocess, validate and convert `text`.
    ///
    /// Fails with [`ExprError::Syntax`] or [`ExprError::Domain`] when the
    /// text is rejected by validation.
    pub fn compile(text: &str) -> ExprResult<Expression> {
        let pre = preprocess(text);
        validate(&pre.substituted)?;
        let postfix = to_postfix(&pre.substituted)?;
        debug!("'{}' -> postfix '{}'", pre.substituted.trim(), postfix);

        Ok(Expression {
            raw: pre.raw,
            substituted: pre.substituted,
            postfix,
            bound: pre.bound,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Text after variable substitution
    pub fn substituted(&self) -> &str {
        &self.substituted
    }

    pub fn postfix(&self) -> &Postfix {
        &self.postfix
    }

    /// Postfix rendering, every token followed by one space
    pub fn postfix_text(&self) -> String {
        self.postfix.to_string()
    }

    pub fn bound_variable(&self) -> Option<f64> {
        self.bound
    }

    pub fn evaluate(&self) -> Outcome {
        Outcome::from(evaluate(&self.postfix))
    }
}

/// Result of a scalar evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(f64),
    Failure(ExprError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Outcome::Success(v) => Some(*v),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ExprError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(e) => Some(e),
        }
    }

    /// Fixed notation with two decimals, or the error message
    pub fn render(&self) -> String {
        match self {
            Outcome::Success(v) => format!("{:.2}", v),
            Outcome::Failure(e) => e.to_string(),
        }
    }
}

impl From<ExprResult<f64>> for Outcome {
    fn from(result: ExprResult<f64>) -> Self {
        match result {
            Ok(v) => Outcome::Success(v),
            Err(e) => Outcome::Failure(e),
        }
    }
}

/// Everything produced for one input string
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    /// The compiled expression, absent when validation failed
    pub expression: Option<Expression>,
    pub outcome: Outcome,
    pub graph: GraphSeries,
}

impl Calculation {
    /// The caller-facing result string
    pub fn result(&self) -> String {
        self.outcome.render()
    }

    /// Postfix text, empty when validation failed
    pub fn postfix_text(&self) -> String {
        self.expression
            .as_ref()
            .map(Expression::postfix_text)
            .unwrap_or_default()
    }
}

/// Evaluate `text` and sample its graph over the default window
pub fn calculate(text: &str) -> Calculation {
    calculate_with_window(text, &GraphWindow::default())
}

/// Evaluate `text` and sample its graph over `window`
pub fn calculate_with_window(text: &str, window: &GraphWindow) -> Calculation {
    let (expression, outcome) = match Expression::compile(text) {
        Ok(expression) => {
            let outcome = expression.evaluate();
            (Some(expression), outcome)
        }
        Err(err) => {
            debug!("rejected '{}': {}", text.trim(), err.detail());
            (None, Outcome::Failure(err))
        }
    };

    Calculation {
        expression,
        outcome,
        graph: graph_for(text, window),
    }
}

/// Sample the graph for `text` with `x` left free.
///
/// The template comes from the text before substitution and only has to
/// parse. Trial evaluation is not run, so an expression whose scalar result
/// is `NOT VALID EXPRESSION` (an unbound `x`, or a domain failure at the
/// bound value) still gets every sample that evaluates. A syntax error
/// means no graph at all.
fn graph_for(text: &str, window: &GraphWindow) -> GraphSeries {
    let pre = preprocess(text);
    if check_syntax(&pre.stripped).is_err() {
        return GraphSeries::default();
    }
    match to_postfix(&pre.stripped) {
        Ok(template) => sample(&template, pre.bound.unwrap_or(0.0), window),
        Err(_) => GraphSeries::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(text: &str) -> String {
        calculate(text).result()
    }

    #[test]
    fn test_compile_keeps_pipeline_stages() {
        let expr = Expression::compile("sin(x) * cos(x) | x = 45").unwrap();
        assert_eq!(expr.raw(), "sin(x) * cos(x) | x = 45");
        assert_eq!(expr.substituted(), "sin(45) * cos(45) ");
        assert_eq!(expr.postfix_text(), "45 sin 45 cos * ");
        assert_eq!(expr.bound_variable(), Some(45.0));
    }

    #[test]
    fn test_results() {
        assert_eq!(result("8 / 4 - 2"), "0.00");
        assert_eq!(result("3589254242 + 423523908"), "4012778150.00");
        assert_eq!(result("cos(1) + sin(1)"), "1.38");
        assert_eq!(result("tan(sqrt(2))"), "6.33");
        assert_eq!(result("ln(cos(1))"), "-0.62");
        assert_eq!(result("asin(0.5) * 20 + atan(1)"), "11.26");
        assert_eq!(result("sin(x) * cos(x) | x = 45"), "0.45");
        assert_eq!(result("sqrt(x) + tan(x) | x = 16"), "4.30");
        assert_eq!(result("asin(x) | x = 1"), "1.57");
    }

    #[test]
    fn test_error_strings() {
        assert_eq!(result("10 / 0"), "division by zero");
        assert_eq!(result("sqrt(-1)"), "NOT VALID EXPRESSION");
        assert_eq!(result("sin(30"), "NOT VALID EXPRESSION");
        assert_eq!(result("x + 5 | y = 10"), "NOT VALID EXPRESSION");
        assert_eq!(result("log10(100)"), "Invalid postfix expression.");
    }

    #[test]
    fn test_rejected_expression_has_no_postfix() {
        let calc = calculate("5 + * 3");
        assert!(calc.expression.is_none());
        assert_eq!(calc.postfix_text(), "");
        assert!(calc.graph.is_empty());
    }

    #[test]
    fn test_graph_is_centred_on_bound_value() {
        let calc = calculate("x * 2 | x = 10");
        assert_eq!(calc.result(), "20.00");
        assert_eq!(calc.graph.len(), 51);
        assert_eq!(calc.graph.xs[0], 5.0);
        assert_eq!(calc.graph.ys[0], 10.0);
    }

    #[test]
    fn test_graph_does_not_change_scalar_result() {
        // The scalar fails on the zero divisor, the graph drops only x = 0
        let calc = calculate("1 / x | x = 0");
        assert_eq!(calc.result(), "division by zero");
        assert_eq!(calc.graph.len(), 50);
    }

    #[test]
    fn test_unbound_variable_still_graphs() {
        let calc = calculate("x ^ 2");
        assert_eq!(calc.result(), "NOT VALID EXPRESSION");
        assert_eq!(calc.graph.len(), 51);

        let calc = calculate("sqrt(x) | x = -1");
        assert_eq!(calc.result(), "NOT VALID EXPRESSION");
        assert!(!calc.graph.is_empty());
        assert!(calc.graph.xs.iter().all(|x| *x >= 0.0));
    }
}
