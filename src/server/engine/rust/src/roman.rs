/* src/server/engine/rust/src/roman.rs */

const NUMERALS: [(u32, &str); 13] = [
  (1000, "M"),
  (900, "CM"),
  (500, "D"),
  (400, "CD"),
  (100, "C"),
  (90, "XC"),
  (50, "L"),
  (40, "XL"),
  (10, "X"),
  (9, "IX"),
  (5, "V"),
  (4, "IV"),
  (1, "I"),
];

/// Greedy-subtraction Roman numeral. Zero has no numeral and yields "".
pub fn to_roman(mut n: u32) -> String {
  let mut out = String::new();
  for &(value, numeral) in &NUMERALS {
    while n >= value {
      out.push_str(numeral);
      n -= value;
    }
  }
  out
}
