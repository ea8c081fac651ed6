// Bluetooth SIG namespace descriptions (namespace 0x01).
//
// 0x0001..=0x00FF are ordinals ("first" .. "two hundred and fifty fifth"),
// 0x0100..=0x0110 name a physical position.

/// Namespace value assigned to the Bluetooth SIG.
pub const SIG_NAMESPACE: u8 = 0x01;

const POSITIONS: [&str; 17] = [
    "front",
    "back",
    "top",
    "bottom",
    "upper",
    "lower",
    "main",
    "backup",
    "auxiliary",
    "supplementary",
    "flash",
    "inside",
    "outside",
    "left",
    "right",
    "internal",
    "external",
];

const ONES: [&str; 20] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
];

const ONES_ORDINAL: [&str; 20] = [
    "",
    "first",
    "second",
    "third",
    "fourth",
    "fifth",
    "sixth",
    "seventh",
    "eighth",
    "ninth",
    "tenth",
    "eleventh",
    "twelfth",
    "thirteenth",
    "fourteenth",
    "fifteenth",
    "sixteenth",
    "seventeenth",
    "eighteenth",
    "nineteenth",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const TENS_ORDINAL: [&str; 10] = [
    "",
    "",
    "twentieth",
    "thirtieth",
    "fortieth",
    "fiftieth",
    "sixtieth",
    "seventieth",
    "eightieth",
    "ninetieth",
];

/// Description text for a SIG description code, or `None` if unassigned.
pub fn description_text(code: u16) -> Option<String> {
    match code {
        0x0001..=0x00FF => Some(ordinal(code as usize)),
        0x0100..=0x0110 => Some(POSITIONS[code as usize - 0x0100].to_string()),
        _ => None,
    }
}

/// English ordinal for `1..=999`.
fn ordinal(n: usize) -> String {
    let (hundreds, rest) = (n / 100, n % 100);
    match (hundreds, rest) {
        (0, _) => ordinal_below_hundred(rest),
        (_, 0) => format!("{} hundredth", ONES[hundreds]),
        // Round tens drop the "and": "one hundred twentieth".
        (_, 20..) if rest.is_multiple_of(10) => {
            format!("{} hundred {}", ONES[hundreds], ordinal_below_hundred(rest))
        }
        _ => format!("{} hundred and {}", ONES[hundreds], ordinal_below_hundred(rest)),
    }
}

fn ordinal_below_hundred(n: usize) -> String {
    if n < 20 {
        return ONES_ORDINAL[n].to_string();
    }
    let (tens, ones) = (n / 10, n % 10);
    if ones == 0 {
        TENS_ORDINAL[tens].to_string()
    } else {
        format!("{} {}", TENS[tens], ONES_ORDINAL[ones])
    }
}
