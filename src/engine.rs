//! Calculator input state machine.
//!
//! Interprets the keypad's symbol stream and maintains the display
//! string. Two operand buffers accumulate typed digits; equals parses
//! both, applies the pending operator, and leaves the formatted result
//! on the display until the next digit or AC press.

use thiserror::Error;

/// Arithmetic operators selectable on the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// On the keypad, but without an evaluation rule: selecting it and
    /// pressing equals falls through to the default case and yields 0.
    Percent,
}

impl Operator {
    /// The symbol shown in the expression line and the JSON output.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
            Operator::Percent => '%',
        }
    }
}

/// One keypad press. This is the engine's entire input alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Digit(u8),
    Dot,
    Clear,      // AC
    SignToggle, // ±
    Op(Operator),
    Equals,
}

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// A character in a key sequence that maps to no keypad key.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized key '{0}' (expected 0-9 . + - * / % = or c for AC)")]
pub struct ParseKeyError(pub char);

impl Key {
    /// The label printed on the keypad button.
    pub fn label(self) -> &'static str {
        match self {
            Key::Digit(d) => DIGIT_LABELS.get(usize::from(d)).copied().unwrap_or("?"),
            Key::Dot => ".",
            Key::Clear => "AC",
            Key::SignToggle => "±",
            Key::Op(Operator::Add) => "+",
            Key::Op(Operator::Subtract) => "-",
            Key::Op(Operator::Multiply) => "×",
            Key::Op(Operator::Divide) => "÷",
            Key::Op(Operator::Percent) => "%",
            Key::Equals => "=",
        }
    }

    /// Map a typed character to a keypad key. ASCII aliases stand in
    /// for the symbols a keyboard does not have: `*`/`x` multiply,
    /// `/` divide, `c` AC, `s` sign toggle.
    pub fn from_char(c: char) -> Option<Key> {
        match c {
            '0'..='9' => Some(Key::Digit(c.to_digit(10)? as u8)),
            '.' => Some(Key::Dot),
            '+' => Some(Key::Op(Operator::Add)),
            '-' => Some(Key::Op(Operator::Subtract)),
            '*' | 'x' | 'X' | '×' => Some(Key::Op(Operator::Multiply)),
            '/' | '÷' => Some(Key::Op(Operator::Divide)),
            '%' => Some(Key::Op(Operator::Percent)),
            '=' => Some(Key::Equals),
            'c' | 'C' => Some(Key::Clear),
            's' | 'S' | '±' => Some(Key::SignToggle),
            _ => None,
        }
    }

    /// Parse a whole press sequence, e.g. `"6/4="`. Whitespace and
    /// commas separate presses and are otherwise ignored.
    pub fn parse_sequence(input: &str) -> Result<Vec<Key>, ParseKeyError> {
        let mut keys = Vec::new();
        for c in input.chars() {
            if c.is_whitespace() || c == ',' {
                continue;
            }
            keys.push(Key::from_char(c).ok_or(ParseKeyError(c))?);
        }
        Ok(keys)
    }
}

/// The calculator state. One instance per session, owned by the event
/// loop and mutated one press at a time; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    display: String,            // what the screen renders, verbatim
    first: String,              // digits typed before an operator is chosen
    second: String,             // digits typed after
    operator: Option<Operator>, // pending until equals
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            display: String::from("0"),
            first: String::new(),
            second: String::new(),
            operator: None,
        }
    }

    /// The string the screen shows.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn first_operand(&self) -> &str {
        &self.first
    }

    pub fn second_operand(&self) -> &str {
        &self.second
    }

    /// The operator awaiting the second operand and an equals press.
    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    /// Feed one keypad press through the state machine. Every press is
    /// a direct synchronous transition; there is no failure path.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => self.push_char(char::from(b'0' + d)),
            Key::Dot => self.push_char('.'),
            Key::Op(op) => self.operator = Some(op),
            Key::Equals => {
                let result = self.evaluate();
                self.display = format_result(result);
                self.first.clear();
                self.second.clear();
                self.operator = None;
            }
            Key::Clear => {
                self.first.clear();
                self.second.clear();
                self.operator = None;
                self.display = String::from("0");
            }
            // The ± button exists on the keypad but is not wired up.
            Key::SignToggle => {}
        }
    }

    /// Append a typed character to whichever operand is accumulating
    /// and mirror that operand on the display. Input is kept as typed:
    /// leading zeros and stray dots fall out at parse time.
    fn push_char(&mut self, c: char) {
        let operand = if self.operator.is_some() {
            &mut self.second
        } else {
            &mut self.first
        };
        operand.push(c);
        self.display = operand.clone();
    }

    /// Parse both operands (empty or malformed reads as 0) and apply
    /// the pending operator. Division is unguarded: /0 produces inf or
    /// NaN and is displayed as such. Percent and a bare equals have no
    /// evaluation rule and fall through to 0.
    fn evaluate(&self) -> f64 {
        let first: f64 = self.first.parse().unwrap_or(0.0);
        let second: f64 = self.second.parse().unwrap_or(0.0);
        match self.operator {
            Some(Operator::Add) => first + second,
            Some(Operator::Subtract) => first - second,
            Some(Operator::Multiply) => first * second,
            Some(Operator::Divide) => first / second,
            _ => 0.0,
        }
    }
}

/// Whole results drop the fractional part ("8", never "8.0");
/// everything else keeps f64's default form, including "inf" and
/// "NaN".
fn format_result(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_all(engine: &mut Engine, sequence: &str) {
        for key in Key::parse_sequence(sequence).unwrap() {
            engine.press(key);
        }
    }

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(Engine::new().display(), "0");
    }

    #[test]
    fn test_digits_accumulate_on_display() {
        let mut engine = Engine::new();
        press_all(&mut engine, "123");
        assert_eq!(engine.display(), "123");
        assert_eq!(engine.first_operand(), "123");
        assert_eq!(engine.second_operand(), "");
    }

    #[test]
    fn test_addition() {
        let mut engine = Engine::new();
        press_all(&mut engine, "5+3=");
        assert_eq!(engine.display(), "8");
    }

    #[test]
    fn test_subtraction_goes_negative() {
        let mut engine = Engine::new();
        press_all(&mut engine, "3-5=");
        assert_eq!(engine.display(), "-2");
    }

    #[test]
    fn test_multiplication() {
        let mut engine = Engine::new();
        press_all(&mut engine, "12x12=");
        assert_eq!(engine.display(), "144");
    }

    #[test]
    fn test_division_with_fractional_result() {
        let mut engine = Engine::new();
        press_all(&mut engine, "6/4=");
        assert_eq!(engine.display(), "1.5");
    }

    #[test]
    fn test_division_by_zero_displays_infinity() {
        let mut engine = Engine::new();
        press_all(&mut engine, "7/0=");
        assert_eq!(engine.display(), "inf");
    }

    #[test]
    fn test_zero_divided_by_zero_displays_nan() {
        let mut engine = Engine::new();
        press_all(&mut engine, "0/0=");
        assert_eq!(engine.display(), "NaN");
    }

    #[test]
    fn test_decimal_operands() {
        let mut engine = Engine::new();
        press_all(&mut engine, "2.5+2.5=");
        assert_eq!(engine.display(), "5");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut engine = Engine::new();
        press_all(&mut engine, "12+34");
        engine.press(Key::Clear);
        assert_eq!(engine.display(), "0");
        assert_eq!(engine.first_operand(), "");
        assert_eq!(engine.second_operand(), "");
        assert_eq!(engine.operator(), None);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut once = Engine::new();
        press_all(&mut once, "9x9");
        once.press(Key::Clear);

        let mut twice = once.clone();
        twice.press(Key::Clear);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_digit_after_equals_starts_fresh() {
        let mut engine = Engine::new();
        press_all(&mut engine, "5+3=");
        engine.press(Key::Digit(2));
        assert_eq!(engine.display(), "2");
        assert_eq!(engine.first_operand(), "2");
    }

    #[test]
    fn test_equals_keeps_result_until_cleared() {
        let mut engine = Engine::new();
        press_all(&mut engine, "5+3=");
        assert_eq!(engine.first_operand(), "");
        assert_eq!(engine.operator(), None);
        assert_eq!(engine.display(), "8");
    }

    #[test]
    fn test_operator_keeps_last_operand_on_display() {
        let mut engine = Engine::new();
        press_all(&mut engine, "12+");
        assert_eq!(engine.display(), "12");
        assert_eq!(engine.operator(), Some(Operator::Add));
    }

    #[test]
    fn test_second_operand_mirrored_while_typed() {
        let mut engine = Engine::new();
        press_all(&mut engine, "12+34");
        assert_eq!(engine.display(), "34");
        assert_eq!(engine.second_operand(), "34");
    }

    #[test]
    fn test_operator_press_replaces_pending() {
        let mut engine = Engine::new();
        press_all(&mut engine, "5+x3=");
        assert_eq!(engine.display(), "15");
    }

    #[test]
    fn test_equals_without_operator_yields_zero() {
        let mut engine = Engine::new();
        press_all(&mut engine, "5=");
        assert_eq!(engine.display(), "0");
        assert_eq!(engine.first_operand(), "");
    }

    #[test]
    fn test_percent_selects_but_evaluates_to_zero() {
        let mut engine = Engine::new();
        press_all(&mut engine, "50%");
        assert_eq!(engine.operator(), Some(Operator::Percent));
        assert_eq!(engine.display(), "50");
        engine.press(Key::Equals);
        assert_eq!(engine.display(), "0");
    }

    #[test]
    fn test_sign_toggle_is_ignored() {
        let mut engine = Engine::new();
        press_all(&mut engine, "5");
        let before = engine.clone();
        engine.press(Key::SignToggle);
        assert_eq!(engine, before);
    }

    #[test]
    fn test_empty_second_operand_parses_as_zero() {
        let mut engine = Engine::new();
        press_all(&mut engine, "5+=");
        assert_eq!(engine.display(), "5");
    }

    #[test]
    fn test_malformed_operand_parses_as_zero() {
        let mut engine = Engine::new();
        press_all(&mut engine, "1.2.3+4=");
        assert_eq!(engine.display(), "4");
    }

    #[test]
    fn test_format_result_forms() {
        assert_eq!(format_result(8.0), "8");
        assert_eq!(format_result(-2.0), "-2");
        assert_eq!(format_result(1.5), "1.5");
        assert_eq!(format_result(f64::INFINITY), "inf");
        assert_eq!(format_result(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_result(f64::NAN), "NaN");
    }

    #[test]
    fn test_key_char_aliases() {
        assert_eq!(Key::from_char('7'), Some(Key::Digit(7)));
        assert_eq!(Key::from_char('*'), Some(Key::Op(Operator::Multiply)));
        assert_eq!(Key::from_char('X'), Some(Key::Op(Operator::Multiply)));
        assert_eq!(Key::from_char('÷'), Some(Key::Op(Operator::Divide)));
        assert_eq!(Key::from_char('C'), Some(Key::Clear));
        assert_eq!(Key::from_char('s'), Some(Key::SignToggle));
        assert_eq!(Key::from_char('#'), None);
    }

    #[test]
    fn test_sequence_skips_separators() {
        let spaced = Key::parse_sequence("5 + 3 =").unwrap();
        let bare = Key::parse_sequence("5+3=").unwrap();
        assert_eq!(spaced, bare);
    }

    #[test]
    fn test_sequence_rejects_unknown_key() {
        let err = Key::parse_sequence("5#3").unwrap_err();
        assert_eq!(err, ParseKeyError('#'));
    }

    #[test]
    fn test_labels_match_keypad_symbols() {
        assert_eq!(Key::Clear.label(), "AC");
        assert_eq!(Key::SignToggle.label(), "±");
        assert_eq!(Key::Op(Operator::Divide).label(), "÷");
        assert_eq!(Key::Op(Operator::Multiply).label(), "×");
        assert_eq!(Key::Digit(0).label(), "0");
        assert_eq!(Key::Equals.label(), "=");
    }
}
