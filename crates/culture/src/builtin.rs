//! Built-in culture records.

use crate::{CultureInfo, CurrencyFormat, DateFormat, NumberFormat, PercentFormat, TimeFormat};

fn names(list: [&str; 12]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

fn days(list: [&str; 7]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const EN_MONTHS_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const EN_DAYS: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];
const EN_DAYS_ABBR: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub(crate) fn en_us() -> CultureInfo {
    CultureInfo {
        name: "en-US".into(),
        number: NumberFormat {
            decimal_separator: ".".into(),
            group_separator: ",".into(),
            group_sizes: vec![3],
            negative_sign: "-".into(),
            negative_pattern: "-n".into(),
        },
        currency: CurrencyFormat {
            symbol: "$".into(),
            decimal_digits: 2,
            decimal_separator: ".".into(),
            group_separator: ",".into(),
            positive_pattern: "$n".into(),
            negative_pattern: "($n)".into(),
        },
        percent: PercentFormat {
            symbol: "%".into(),
            decimal_digits: 2,
            positive_pattern: "n%".into(),
            negative_pattern: "-n%".into(),
        },
        date: DateFormat {
            short_date_pattern: "M/d/yyyy".into(),
            abbreviated_date_pattern: "MMM d, yyyy".into(),
            long_date_pattern: "dddd, MMMM d, yyyy".into(),
            short_day_month_pattern: "M/d".into(),
            abbreviated_day_month_pattern: "MMM d".into(),
            long_day_month_pattern: "MMMM d".into(),
            short_month_year_pattern: "M/yyyy".into(),
            abbreviated_month_year_pattern: "MMM yyyy".into(),
            long_month_year_pattern: "MMMM yyyy".into(),
            month_names: names(EN_MONTHS),
            abbreviated_month_names: names(EN_MONTHS_ABBR),
            day_names: days(EN_DAYS),
            abbreviated_day_names: days(EN_DAYS_ABBR),
            two_digit_year_max: 2029,
        },
        time: TimeFormat {
            short_time_pattern: "h:mm tt".into(),
            long_time_pattern: "h:mm:ss tt".into(),
            am_designator: "AM".into(),
            pm_designator: "PM".into(),
            time_separator: ":".into(),
        },
    }
}

pub(crate) fn en_gb() -> CultureInfo {
    let mut culture = en_us();
    culture.name = "en-GB".into();
    culture.currency.symbol = "£".into();
    culture.currency.positive_pattern = "$n".into();
    culture.currency.negative_pattern = "-$n".into();
    culture.date.short_date_pattern = "dd/MM/yyyy".into();
    culture.date.abbreviated_date_pattern = "d MMM yyyy".into();
    culture.date.long_date_pattern = "dddd, d MMMM yyyy".into();
    culture.date.short_day_month_pattern = "dd/MM".into();
    culture.date.abbreviated_day_month_pattern = "d MMM".into();
    culture.date.long_day_month_pattern = "d MMMM".into();
    culture.date.short_month_year_pattern = "MM/yyyy".into();
    culture.time.short_time_pattern = "HH:mm".into();
    culture.time.long_time_pattern = "HH:mm:ss".into();
    culture.time.am_designator = "am".into();
    culture.time.pm_designator = "pm".into();
    culture
}

pub(crate) fn de_de() -> CultureInfo {
    CultureInfo {
        name: "de-DE".into(),
        number: NumberFormat {
            decimal_separator: ",".into(),
            group_separator: ".".into(),
            group_sizes: vec![3],
            negative_sign: "-".into(),
            negative_pattern: "-n".into(),
        },
        currency: CurrencyFormat {
            symbol: "€".into(),
            decimal_digits: 2,
            decimal_separator: ",".into(),
            group_separator: ".".into(),
            positive_pattern: "n $".into(),
            negative_pattern: "-n $".into(),
        },
        percent: PercentFormat {
            symbol: "%".into(),
            decimal_digits: 2,
            positive_pattern: "n %".into(),
            negative_pattern: "-n %".into(),
        },
        date: DateFormat {
            short_date_pattern: "dd.MM.yyyy".into(),
            abbreviated_date_pattern: "d. MMM yyyy".into(),
            long_date_pattern: "dddd, d. MMMM yyyy".into(),
            short_day_month_pattern: "dd.MM.".into(),
            abbreviated_day_month_pattern: "d. MMM".into(),
            long_day_month_pattern: "d. MMMM".into(),
            short_month_year_pattern: "MM.yyyy".into(),
            abbreviated_month_year_pattern: "MMM yyyy".into(),
            long_month_year_pattern: "MMMM yyyy".into(),
            month_names: names([
                "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August",
                "September", "Oktober", "November", "Dezember",
            ]),
            abbreviated_month_names: names([
                "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
            ]),
            day_names: days([
                "Sonntag", "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag",
            ]),
            abbreviated_day_names: days(["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"]),
            two_digit_year_max: 2029,
        },
        time: TimeFormat {
            short_time_pattern: "HH:mm".into(),
            long_time_pattern: "HH:mm:ss".into(),
            am_designator: String::new(),
            pm_designator: String::new(),
            time_separator: ":".into(),
        },
    }
}

pub(crate) fn fr_fr() -> CultureInfo {
    let mut culture = de_de();
    culture.name = "fr-FR".into();
    culture.number.group_separator = "\u{a0}".into();
    culture.currency.group_separator = "\u{a0}".into();
    culture.date.short_date_pattern = "dd/MM/yyyy".into();
    culture.date.abbreviated_date_pattern = "d MMM yyyy".into();
    culture.date.long_date_pattern = "dddd d MMMM yyyy".into();
    culture.date.short_day_month_pattern = "dd/MM".into();
    culture.date.abbreviated_day_month_pattern = "d MMM".into();
    culture.date.long_day_month_pattern = "d MMMM".into();
    culture.date.short_month_year_pattern = "MM/yyyy".into();
    culture.date.month_names = names([
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
        "octobre", "novembre", "décembre",
    ]);
    culture.date.abbreviated_month_names = names([
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
        "déc.",
    ]);
    culture.date.day_names = days([
        "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
    ]);
    culture.date.abbreviated_day_names =
        days(["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."]);
    culture
}

/// Every built-in culture, default first.
pub(crate) fn all() -> Vec<CultureInfo> {
    vec![en_us(), en_gb(), de_de(), fr_fr()]
}
