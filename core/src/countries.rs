// Country dial-code table
//
// The placeholder is an example local number in the national format users
// actually type, shown as input help.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code
    pub iso: &'static str,
    pub name: &'static str,
    /// Dial code with the `+` prefix
    pub dial: &'static str,
    pub flag: &'static str,
    pub placeholder: &'static str,
}

pub const COUNTRIES: &[Country] = &[
    Country { iso: "US", name: "United States", dial: "+1", flag: "🇺🇸", placeholder: "2015550123" },
    Country { iso: "CA", name: "Canada", dial: "+1", flag: "🇨🇦", placeholder: "5062345678" },
    Country { iso: "MX", name: "México", dial: "+52", flag: "🇲🇽", placeholder: "2221234567" },
    Country { iso: "ES", name: "España", dial: "+34", flag: "🇪🇸", placeholder: "612345678" },
    Country { iso: "AR", name: "Argentina", dial: "+54", flag: "🇦🇷", placeholder: "91123456789" },
    Country { iso: "CO", name: "Colombia", dial: "+57", flag: "🇨🇴", placeholder: "3211234567" },
    Country { iso: "PE", name: "Perú", dial: "+51", flag: "🇵🇪", placeholder: "912345678" },
    Country { iso: "CL", name: "Chile", dial: "+56", flag: "🇨🇱", placeholder: "961234567" },
    Country { iso: "VE", name: "Venezuela", dial: "+58", flag: "🇻🇪", placeholder: "4121234567" },
    Country { iso: "EC", name: "Ecuador", dial: "+593", flag: "🇪🇨", placeholder: "991234567" },
    Country { iso: "BO", name: "Bolivia", dial: "+591", flag: "🇧🇴", placeholder: "71234567" },
    Country { iso: "PY", name: "Paraguay", dial: "+595", flag: "🇵🇾", placeholder: "961456789" },
    Country { iso: "UY", name: "Uruguay", dial: "+598", flag: "🇺🇾", placeholder: "94231234" },
    Country { iso: "BR", name: "Brasil", dial: "+55", flag: "🇧🇷", placeholder: "11961234567" },
    Country { iso: "GT", name: "Guatemala", dial: "+502", flag: "🇬🇹", placeholder: "51234567" },
    Country { iso: "HN", name: "Honduras", dial: "+504", flag: "🇭🇳", placeholder: "91234567" },
    Country { iso: "SV", name: "El Salvador", dial: "+503", flag: "🇸🇻", placeholder: "70123456" },
    Country { iso: "NI", name: "Nicaragua", dial: "+505", flag: "🇳🇮", placeholder: "81234567" },
    Country { iso: "CR", name: "Costa Rica", dial: "+506", flag: "🇨🇷", placeholder: "83123456" },
    Country { iso: "PA", name: "Panamá", dial: "+507", flag: "🇵🇦", placeholder: "61234567" },
    Country { iso: "DO", name: "República Dominicana", dial: "+1809", flag: "🇩🇴", placeholder: "2345678" },
    Country { iso: "CU", name: "Cuba", dial: "+53", flag: "🇨🇺", placeholder: "51234567" },
    Country { iso: "PR", name: "Puerto Rico", dial: "+1787", flag: "🇵🇷", placeholder: "2345678" },
    Country { iso: "GB", name: "United Kingdom", dial: "+44", flag: "🇬🇧", placeholder: "7400123456" },
    Country { iso: "IE", name: "Ireland", dial: "+353", flag: "🇮🇪", placeholder: "850123456" },
    Country { iso: "FR", name: "France", dial: "+33", flag: "🇫🇷", placeholder: "612345678" },
    Country { iso: "DE", name: "Deutschland", dial: "+49", flag: "🇩🇪", placeholder: "15123456789" },
    Country { iso: "IT", name: "Italia", dial: "+39", flag: "🇮🇹", placeholder: "3123456789" },
    Country { iso: "PT", name: "Portugal", dial: "+351", flag: "🇵🇹", placeholder: "912345678" },
    Country { iso: "NL", name: "Nederland", dial: "+31", flag: "🇳🇱", placeholder: "612345678" },
    Country { iso: "BE", name: "Belgique", dial: "+32", flag: "🇧🇪", placeholder: "470123456" },
    Country { iso: "CH", name: "Schweiz", dial: "+41", flag: "🇨🇭", placeholder: "781234567" },
    Country { iso: "AT", name: "Österreich", dial: "+43", flag: "🇦🇹", placeholder: "6641234567" },
    Country { iso: "SE", name: "Sverige", dial: "+46", flag: "🇸🇪", placeholder: "701234567" },
    Country { iso: "NO", name: "Norge", dial: "+47", flag: "🇳🇴", placeholder: "40612345" },
    Country { iso: "DK", name: "Danmark", dial: "+45", flag: "🇩🇰", placeholder: "32123456" },
    Country { iso: "FI", name: "Suomi", dial: "+358", flag: "🇫🇮", placeholder: "412345678" },
    Country { iso: "PL", name: "Polska", dial: "+48", flag: "🇵🇱", placeholder: "512345678" },
    Country { iso: "GR", name: "Ελλάδα", dial: "+30", flag: "🇬🇷", placeholder: "6912345678" },
    Country { iso: "RO", name: "România", dial: "+40", flag: "🇷🇴", placeholder: "712034567" },
    Country { iso: "RU", name: "Россия", dial: "+7", flag: "🇷🇺", placeholder: "9123456789" },
    Country { iso: "UA", name: "Україна", dial: "+380", flag: "🇺🇦", placeholder: "501234567" },
    Country { iso: "TR", name: "Türkiye", dial: "+90", flag: "🇹🇷", placeholder: "5012345678" },
    Country { iso: "MA", name: "Maroc", dial: "+212", flag: "🇲🇦", placeholder: "650123456" },
    Country { iso: "EG", name: "مصر", dial: "+20", flag: "🇪🇬", placeholder: "1001234567" },
    Country { iso: "NG", name: "Nigeria", dial: "+234", flag: "🇳🇬", placeholder: "8021234567" },
    Country { iso: "ZA", name: "South Africa", dial: "+27", flag: "🇿🇦", placeholder: "711234567" },
    Country { iso: "IN", name: "India", dial: "+91", flag: "🇮🇳", placeholder: "8123456789" },
    Country { iso: "PK", name: "Pakistan", dial: "+92", flag: "🇵🇰", placeholder: "3012345678" },
    Country { iso: "BD", name: "Bangladesh", dial: "+880", flag: "🇧🇩", placeholder: "1812345678" },
    Country { iso: "CN", name: "中国", dial: "+86", flag: "🇨🇳", placeholder: "13123456789" },
    Country { iso: "JP", name: "日本", dial: "+81", flag: "🇯🇵", placeholder: "9012345678" },
    Country { iso: "KR", name: "대한민국", dial: "+82", flag: "🇰🇷", placeholder: "1020000000" },
    Country { iso: "PH", name: "Philippines", dial: "+63", flag: "🇵🇭", placeholder: "9051234567" },
    Country { iso: "ID", name: "Indonesia", dial: "+62", flag: "🇮🇩", placeholder: "812345678" },
    Country { iso: "AU", name: "Australia", dial: "+61", flag: "🇦🇺", placeholder: "412345678" },
    Country { iso: "NZ", name: "New Zealand", dial: "+64", flag: "🇳🇿", placeholder: "211234567" },
    Country { iso: "IL", name: "ישראל", dial: "+972", flag: "🇮🇱", placeholder: "502345678" },
    Country { iso: "SA", name: "السعودية", dial: "+966", flag: "🇸🇦", placeholder: "512345678" },
    Country { iso: "AE", name: "الإمارات", dial: "+971", flag: "🇦🇪", placeholder: "501234567" },
];

pub fn all() -> &'static [Country] {
    COUNTRIES
}

/// Look up by ISO code, case-insensitive (`"es"` and `"ES"` both match).
pub fn by_iso(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.iso.eq_ignore_ascii_case(code))
}

/// First country carrying the given dial code (+1 maps to the US entry).
pub fn by_dial(dial: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.dial == dial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_iso_case_insensitive() {
        assert_eq!(by_iso("es").unwrap().dial, "+34");
        assert_eq!(by_iso("ES").unwrap().dial, "+34");
        assert!(by_iso("zz").is_none());
    }

    #[test]
    fn test_by_dial_first_match() {
        assert_eq!(by_dial("+1").unwrap().iso, "US");
        assert_eq!(by_dial("+34").unwrap().iso, "ES");
    }

    #[test]
    fn test_dial_codes_well_formed() {
        for country in all() {
            assert!(country.dial.starts_with('+'), "{} dial", country.iso);
            assert!(country.dial[1..].chars().all(|c| c.is_ascii_digit()));
            assert_eq!(country.iso.len(), 2);
        }
    }
}
