use std::fmt;
use std::str::FromStr;

use crate::error::EncodeError;

/// Character encoding the input bytes are declared in
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    Iso8859_1,
    Iso8859_2,
    Iso8859_3,
    Iso8859_4,
    Iso8859_5,
    Iso8859_6,
    Iso8859_7,
    Iso8859_8,
    Iso8859_9,
    Iso8859_10,
    Iso8859_11,
    Iso8859_13,
    Iso8859_14,
    Iso8859_15,
    Iso8859_16,
    ShiftJis,
    Windows1250,
    Windows1251,
    Windows1252,
    Windows1256,
    Utf16Be,
    #[default]
    Utf8,
    Ascii,
    Gbk,
    EucKr,
}

impl Charset {
    /// Every supported charset
    pub const ALL: [Charset; 25] = [
        Charset::Iso8859_1,
        Charset::Iso8859_2,
        Charset::Iso8859_3,
        Charset::Iso8859_4,
        Charset::Iso8859_5,
        Charset::Iso8859_6,
        Charset::Iso8859_7,
        Charset::Iso8859_8,
        Charset::Iso8859_9,
        Charset::Iso8859_10,
        Charset::Iso8859_11,
        Charset::Iso8859_13,
        Charset::Iso8859_14,
        Charset::Iso8859_15,
        Charset::Iso8859_16,
        Charset::ShiftJis,
        Charset::Windows1250,
        Charset::Windows1251,
        Charset::Windows1252,
        Charset::Windows1256,
        Charset::Utf16Be,
        Charset::Utf8,
        Charset::Ascii,
        Charset::Gbk,
        Charset::EucKr,
    ];

    /// ECI assignment number
    pub fn eci_designator(&self) -> u32 {
        match self {
            Charset::Iso8859_1 => 3,
            Charset::Iso8859_2 => 4,
            Charset::Iso8859_3 => 5,
            Charset::Iso8859_4 => 6,
            Charset::Iso8859_5 => 7,
            Charset::Iso8859_6 => 8,
            Charset::Iso8859_7 => 9,
            Charset::Iso8859_8 => 10,
            Charset::Iso8859_9 => 11,
            Charset::Iso8859_10 => 12,
            Charset::Iso8859_11 => 13,
            Charset::Iso8859_13 => 15,
            Charset::Iso8859_14 => 16,
            Charset::Iso8859_15 => 17,
            Charset::Iso8859_16 => 18,
            Charset::ShiftJis => 20,
            Charset::Windows1250 => 21,
            Charset::Windows1251 => 22,
            Charset::Windows1252 => 23,
            Charset::Windows1256 => 24,
            Charset::Utf16Be => 25,
            Charset::Utf8 => 26,
            Charset::Ascii => 27,
            Charset::Gbk => 29,
            Charset::EucKr => 30,
        }
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Iso8859_1 => "ISO-8859-1",
            Charset::Iso8859_2 => "ISO-8859-2",
            Charset::Iso8859_3 => "ISO-8859-3",
            Charset::Iso8859_4 => "ISO-8859-4",
            Charset::Iso8859_5 => "ISO-8859-5",
            Charset::Iso8859_6 => "ISO-8859-6",
            Charset::Iso8859_7 => "ISO-8859-7",
            Charset::Iso8859_8 => "ISO-8859-8",
            Charset::Iso8859_9 => "ISO-8859-9",
            Charset::Iso8859_10 => "ISO-8859-10",
            Charset::Iso8859_11 => "ISO-8859-11",
            Charset::Iso8859_13 => "ISO-8859-13",
            Charset::Iso8859_14 => "ISO-8859-14",
            Charset::Iso8859_15 => "ISO-8859-15",
            Charset::Iso8859_16 => "ISO-8859-16",
            Charset::ShiftJis => "Shift_JIS",
            Charset::Windows1250 => "windows-1250",
            Charset::Windows1251 => "windows-1251",
            Charset::Windows1252 => "windows-1252",
            Charset::Windows1256 => "windows-1256",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Utf8 => "UTF-8",
            Charset::Ascii => "ASCII",
            Charset::Gbk => "GBK",
            Charset::EucKr => "EUC-KR",
        }
    }

    /// Bytes below 0x80 mean the same thing as in ASCII, so numeric and
    /// alphanumeric modes may carry them
    pub fn is_ascii_compatible(&self) -> bool {
        !matches!(self, Charset::Utf16Be)
    }

    /// Kanji mode is only available for Shift_JIS input
    pub fn supports_kanji(&self) -> bool {
        matches!(self, Charset::ShiftJis)
    }

    /// Readers assume ISO-8859-1 when a symbol carries no ECI
    pub fn is_default_interpretation(&self) -> bool {
        matches!(self, Charset::Iso8859_1)
    }
}

impl FromStr for Charset {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if let Some(part) = key.strip_prefix("ISO8859") {
            return match part {
                "1" => Ok(Charset::Iso8859_1),
                "2" => Ok(Charset::Iso8859_2),
                "3" => Ok(Charset::Iso8859_3),
                "4" => Ok(Charset::Iso8859_4),
                "5" => Ok(Charset::Iso8859_5),
                "6" => Ok(Charset::Iso8859_6),
                "7" => Ok(Charset::Iso8859_7),
                "8" => Ok(Charset::Iso8859_8),
                "9" => Ok(Charset::Iso8859_9),
                "10" => Ok(Charset::Iso8859_10),
                "11" => Ok(Charset::Iso8859_11),
                "13" => Ok(Charset::Iso8859_13),
                "14" => Ok(Charset::Iso8859_14),
                "15" => Ok(Charset::Iso8859_15),
                "16" => Ok(Charset::Iso8859_16),
                _ => Err(EncodeError::UnknownCharset(s.to_string())),
            };
        }

        match key.as_str() {
            "LATIN1" => Ok(Charset::Iso8859_1),
            "SHIFTJIS" | "SJIS" => Ok(Charset::ShiftJis),
            "WINDOWS1250" | "CP1250" => Ok(Charset::Windows1250),
            "WINDOWS1251" | "CP1251" => Ok(Charset::Windows1251),
            "WINDOWS1252" | "CP1252" => Ok(Charset::Windows1252),
            "WINDOWS1256" | "CP1256" => Ok(Charset::Windows1256),
            "UTF16BE" => Ok(Charset::Utf16Be),
            "UTF8" => Ok(Charset::Utf8),
            "ASCII" | "USASCII" => Ok(Charset::Ascii),
            "GBK" => Ok(Charset::Gbk),
            "EUCKR" => Ok(Charset::EucKr),
            _ => Err(EncodeError::UnknownCharset(s.to_string())),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("utf-8".parse::<Charset>().unwrap(), Charset::Utf8);
        assert_eq!("SHIFT-JIS".parse::<Charset>().unwrap(), Charset::ShiftJis);
        assert_eq!("iso-8859-15".parse::<Charset>().unwrap(), Charset::Iso8859_15);
        assert_eq!("WINDOWS-1256".parse::<Charset>().unwrap(), Charset::Windows1256);
        assert_eq!("UTF-16BE".parse::<Charset>().unwrap(), Charset::Utf16Be);
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for charset in Charset::ALL {
            assert_eq!(charset.name().parse::<Charset>().unwrap(), charset);
        }
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(
            "ISO-8859-12".parse::<Charset>(),
            Err(EncodeError::UnknownCharset("ISO-8859-12".to_string()))
        );
        assert!("EBCDIC".parse::<Charset>().is_err());
    }

    #[test]
    fn test_eci_designators_unique() {
        let mut seen: Vec<u32> = Charset::ALL.iter().map(|c| c.eci_designator()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), Charset::ALL.len());
        assert_eq!(Charset::Utf8.eci_designator(), 26);
    }
}
