use serde::{Deserialize, Serialize};

/// A closed set of options offered by a select input.
pub trait Choice: Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    /// Value exactly as the classifier expects it.
    fn as_str(&self) -> &'static str;
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ALL[0]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum!(HotelType {
    ResortHotel => "Resort Hotel",
    CityHotel => "City Hotel",
});

choice_enum!(MealPlan {
    Bb => "BB",
    Fb => "FB",
    Hb => "HB",
    Sc => "SC",
    Undefined => "Undefined",
});

choice_enum!(MarketSegment {
    Direct => "Direct",
    Corporate => "Corporate",
    OnlineTa => "Online TA",
    OfflineTaTo => "Offline TA/TO",
    Complementary => "Complementary",
    Aviation => "Aviation",
    Groups => "Groups",
});

choice_enum!(DistributionChannel {
    Direct => "Direct",
    Corporate => "Corporate",
    TaTo => "TA/TO",
    Gds => "GDS",
    Undefined => "Undefined",
});

choice_enum!(RoomType {
    A => "A",
    B => "B",
    C => "C",
    D => "D",
    E => "E",
    F => "F",
    G => "G",
    H => "H",
    I => "I",
    J => "J",
});

choice_enum!(DepositType {
    NoDeposit => "No Deposit",
    Refundable => "Refundable",
    NonRefund => "Non Refund",
});

choice_enum!(CustomerType {
    Transient => "Transient",
    Contract => "Contract",
    TransientParty => "Transient-Party",
    Group => "Group",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_strings_match_display() {
        for segment in MarketSegment::ALL {
            let json = serde_json::to_string(segment).unwrap();
            assert_eq!(json, format!("\"{}\"", segment));
        }
        assert_eq!(MarketSegment::ALL.len(), 7);
        assert_eq!(DistributionChannel::ALL.len(), 5);
        assert_eq!(RoomType::ALL.len(), 10);
    }

    #[test]
    fn test_first_option_is_default() {
        assert_eq!(HotelType::default(), HotelType::ResortHotel);
        assert_eq!(DepositType::default(), DepositType::NoDeposit);
        assert_eq!(CustomerType::default(), CustomerType::Transient);
    }
}
