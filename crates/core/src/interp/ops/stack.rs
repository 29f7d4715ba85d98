//! Arithmetic, operand stack and dictionary operators.
//!
//! Handles: neg, add, sub, mul, div, exch, dup, dict, begin, end, def

use crate::interp::interpreter::Interpreter;
use crate::model::StackValue;
use crate::model::objects::new_dict;

impl Interpreter {
    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Negates the top operand; non-numeric operands become 0.
    ///
    /// PostScript operator: `neg`
    pub fn do_neg(&mut self) {
        let value = self
            .pop_value()
            .and_then(|value| value.as_number())
            .map_or(0.0, |n| -n);
        self.push_number(value);
    }

    /// PostScript operator: `add`
    pub fn do_add(&mut self, a: f64, b: f64) {
        self.push_number(a + b);
    }

    /// PostScript operator: `sub`
    pub fn do_sub(&mut self, a: f64, b: f64) {
        self.push_number(a - b);
    }

    /// PostScript operator: `mul`
    pub fn do_mul(&mut self, a: f64, b: f64) {
        self.push_number(a * b);
    }

    /// Division by zero yields 0 instead of an error.
    ///
    /// PostScript operator: `div`
    pub fn do_div(&mut self, a: f64, b: f64) {
        self.push_number(if b == 0.0 { 0.0 } else { a / b });
    }

    // ========================================================================
    // Stack manipulation
    // ========================================================================

    /// PostScript operator: `exch`
    pub fn do_exch(&mut self) {
        let len = self.stack.len();
        if len >= 2 {
            self.stack.swap(len - 1, len - 2);
        }
    }

    /// PostScript operator: `dup`
    pub fn do_dup(&mut self) {
        if let Some(top) = self.stack.last().cloned() {
            self.stack.push(top);
        }
    }

    // ========================================================================
    // Dictionaries
    // ========================================================================

    /// Pushes a fresh empty dictionary. The capacity operand is already
    /// consumed.
    ///
    /// PostScript operator: `dict`
    pub fn do_dict(&mut self) {
        self.stack.push(StackValue::Dict(new_dict()));
    }

    /// Makes `dict` the innermost dictionary, or a fresh one when the
    /// operand is not a dictionary.
    ///
    /// PostScript operator: `begin`
    pub fn do_begin(&mut self, dict: Option<StackValue>) {
        let dict = match dict {
            Some(StackValue::Dict(dict)) => dict,
            _ => new_dict(),
        };
        self.dict_stack.push(dict);
    }

    /// PostScript operator: `end`
    pub fn do_end(&mut self) {
        if self.dict_stack.len() > 1 {
            self.dict_stack.pop();
        }
    }

    /// Binds `value` to `key` in the innermost dictionary.
    ///
    /// PostScript operator: `def`
    pub fn do_def(&mut self, key: &StackValue, value: StackValue) {
        if let Some(dict) = self.dict_stack.last() {
            dict.borrow_mut().insert(key.to_display_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::interp::interpreter::Interpreter;
    use crate::model::StackValue;
    use crate::parser::tokenize;

    fn numbers(source: &str) -> Vec<f64> {
        let mut interp = Interpreter::new();
        interp.run(&tokenize(source));
        interp
            .operand_stack()
            .iter()
            .filter_map(StackValue::as_number)
            .collect()
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(numbers("3 4 add 10 2 sub 6 7 mul 9 3 div"), vec![7.0, 8.0, 42.0, 3.0]);
    }

    #[test]
    fn test_missing_operands_default() {
        assert_eq!(numbers("add"), vec![0.0]);
        assert_eq!(numbers("mul"), vec![1.0]);
        assert_eq!(numbers("5 0 div"), vec![0.0]);
        assert_eq!(numbers("(abc) neg"), vec![0.0]);
    }

    #[test]
    fn test_numeric_strings_coerce() {
        assert_eq!(numbers("(2) (3.5) add"), vec![5.5]);
    }

    #[test]
    fn test_exch_and_dup() {
        assert_eq!(numbers("1 2 exch"), vec![2.0, 1.0]);
        assert_eq!(numbers("5 dup"), vec![5.0, 5.0]);
        assert!(numbers("dup exch").is_empty());
    }

    #[test]
    fn test_def_and_lookup() {
        assert_eq!(numbers("/w 5 def w w add"), vec![10.0]);
    }

    #[test]
    fn test_begin_end_scoping() {
        let mut interp = Interpreter::new();
        interp.run(&tokenize("/x 1 def 10 dict begin /x 2 def x end x"));
        let values: Vec<f64> = interp
            .operand_stack()
            .iter()
            .filter_map(StackValue::as_number)
            .collect();
        assert_eq!(values, vec![2.0, 1.0]);
        assert_eq!(interp.dict_depth(), 1);
    }

    #[test]
    fn test_global_dict_never_popped() {
        let mut interp = Interpreter::new();
        interp.run(&tokenize("end end"));
        assert_eq!(interp.dict_depth(), 1);
    }
}
