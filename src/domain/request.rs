//! Request values built by callers and consumed once by `CcbClient`.

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Selects one or many individual profiles.
///
/// Several selector groups can be filled in at once, but only the first
/// complete one is sent, in this order:
///
/// 1. `id` (non-zero)
/// 2. `login` and `password`
/// 3. `routing_number` and `account_number` (MICR)
/// 4. the listing filters `modified_since`, `include_inactive`, `page`,
///    `per_page`
///
/// Fields of lower groups are silently ignored when a higher group is
/// complete, so setting `id` together with `page` returns a single profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndividualProfilesRequest {
    /// Zero means not set.
    pub id: u64,
    pub login: Option<String>,
    pub password: Option<String>,
    pub routing_number: Option<String>,
    pub account_number: Option<String>,
    pub modified_since: Option<NaiveDate>,
    pub include_inactive: Option<bool>,
    /// Zero means not set.
    pub page: u32,
    /// Zero means not set.
    pub per_page: u32,
}

impl IndividualProfilesRequest {
    /// Every individual, subject to the listing filters.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn by_login(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: Some(login.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    pub fn by_micr(routing_number: impl Into<String>, account_number: impl Into<String>) -> Self {
        Self {
            routing_number: Some(routing_number.into()),
            account_number: Some(account_number.into()),
            ..Self::default()
        }
    }

    pub fn modified_since(mut self, date: NaiveDate) -> Self {
        self.modified_since = Some(date);
        self
    }

    pub fn include_inactive(mut self, include: bool) -> Self {
        self.include_inactive = Some(include);
        self
    }

    pub fn page(mut self, page: u32, per_page: u32) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustomFieldLabelsRequest;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CampusListRequest;

/// One row per lookup table: variant and CCB identifier. The service name
/// is derived as `<identifier>_list`.
macro_rules! lookup_tables {
    ($($variant:ident => $identifier:literal),+ $(,)?) => {
        /// The pulldown lists CCB exposes through `<name>_list` services.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum LookupTableType {
            $($variant),+
        }

        impl LookupTableType {
            pub const ALL: &'static [LookupTableType] = &[$(Self::$variant),+];

            /// Table identifier as used in CCB service names.
            pub fn identifier(&self) -> &'static str {
                match self {
                    $(Self::$variant => $identifier),+
                }
            }

            pub fn service_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => concat!($identifier, "_list")),+
                }
            }
        }
    };
}

lookup_tables! {
    Ability => "ability",
    Activity => "activity",
    AgeBracket => "age_bracket",
    Area => "area",
    ChurchService => "church_service",
    EventGrouping => "event_grouping",
    GroupGrouping => "group_grouping",
    GroupType => "group_type",
    Hobby => "hobby",
    HowJoinedChurch => "how_joined_church",
    HowTheyHeard => "how_they_heard",
    MeetDay => "meet_day",
    MeetTime => "meet_time",
    MembershipType => "membership_type",
    ReasonLeftChurch => "reason_left_church",
    School => "school",
    SchoolGrade => "school_grade",
    SignificantEvent => "significant_event",
    SpiritualGift => "spiritual_gift",
    Style => "style",
    TransactionGrouping => "transaction_grouping",
    UdfGroupPulldown1 => "udf_grp_pulldown_1",
    UdfGroupPulldown2 => "udf_grp_pulldown_2",
    UdfGroupPulldown3 => "udf_grp_pulldown_3",
    UdfIndividualPulldown1 => "udf_ind_pulldown_1",
    UdfIndividualPulldown2 => "udf_ind_pulldown_2",
    UdfIndividualPulldown3 => "udf_ind_pulldown_3",
    UdfIndividualPulldown4 => "udf_ind_pulldown_4",
    UdfIndividualPulldown5 => "udf_ind_pulldown_5",
    UdfIndividualPulldown6 => "udf_ind_pulldown_6",
    UdfResourcePulldown1 => "udf_resource_pulldown_1",
}

impl LookupTableType {
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.identifier() == identifier)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTableRequest {
    pub table: LookupTableType,
}

impl LookupTableRequest {
    pub fn new(table: LookupTableType) -> Self {
        Self { table }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaritalStatus {
    Single,
    Married,
    Widowed,
    Divorced,
    Separated,
    NotSelected,
}

impl MaritalStatus {
    fn code(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "s",
            MaritalStatus::Married => "m",
            MaritalStatus::Widowed => "w",
            MaritalStatus::Divorced => "d",
            MaritalStatus::Separated => "p",
            MaritalStatus::NotSelected => " ",
        }
    }
}

/// Changes to one individual, sent as the `update_individual` form body.
///
/// Only fields that were set are sent; CCB leaves the rest untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateIndividualProfileRequest {
    pub individual_id: u64,
    fields: BTreeMap<String, String>,
}

impl UpdateIndividualProfileRequest {
    pub fn new(individual_id: u64) -> Self {
        Self {
            individual_id,
            fields: BTreeMap::new(),
        }
    }

    /// Form fields in wire-name order.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn set(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    fn set_date(self, key: &str, date: NaiveDate) -> Self {
        let value = date.format("%Y-%m-%d").to_string();
        self.set(key, value)
    }

    fn set_flag(self, key: &str, flag: bool) -> Self {
        self.set(key, if flag { "true" } else { "false" })
    }

    pub fn first_name(self, value: impl Into<String>) -> Self {
        self.set("first_name", value)
    }

    pub fn last_name(self, value: impl Into<String>) -> Self {
        self.set("last_name", value)
    }

    pub fn middle_name(self, value: impl Into<String>) -> Self {
        self.set("middle_name", value)
    }

    pub fn legal_first_name(self, value: impl Into<String>) -> Self {
        self.set("legal_first_name", value)
    }

    pub fn salutation(self, value: impl Into<String>) -> Self {
        self.set("salutation", value)
    }

    pub fn suffix(self, value: impl Into<String>) -> Self {
        self.set("suffix", value)
    }

    pub fn email(self, value: impl Into<String>) -> Self {
        self.set("email", value)
    }

    pub fn allergies(self, value: impl Into<String>) -> Self {
        self.set("allergies", value)
    }

    pub fn confirmed_no_allergies(self, confirmed: bool) -> Self {
        self.set_flag("confirmed_no_allergies", confirmed)
    }

    pub fn gender(self, gender: Gender) -> Self {
        self.set("gender", gender.code())
    }

    pub fn marital_status(self, status: MaritalStatus) -> Self {
        self.set("marital_status", status.code())
    }

    pub fn birthday(self, date: NaiveDate) -> Self {
        self.set_date("birthday", date)
    }

    pub fn anniversary(self, date: NaiveDate) -> Self {
        self.set_date("anniversary", date)
    }

    pub fn deceased(self, date: NaiveDate) -> Self {
        self.set_date("deceased", date)
    }

    pub fn membership_date(self, date: NaiveDate) -> Self {
        self.set_date("membership_date", date)
    }

    pub fn membership_type_id(self, id: u64) -> Self {
        self.set("membership_type_id", id.to_string())
    }

    pub fn baptized(self, baptized: bool) -> Self {
        self.set_flag("baptized", baptized)
    }

    pub fn campus_id(self, id: u64) -> Self {
        self.set("campus_id", id.to_string())
    }

    pub fn contact_phone(self, value: impl Into<String>) -> Self {
        self.set("contact_phone", value)
    }

    pub fn home_phone(self, value: impl Into<String>) -> Self {
        self.set("home_phone", value)
    }

    pub fn work_phone(self, value: impl Into<String>) -> Self {
        self.set("work_phone", value)
    }

    pub fn mobile_phone(self, value: impl Into<String>) -> Self {
        self.set("mobile_phone", value)
    }

    pub fn emergency_contact_name(self, value: impl Into<String>) -> Self {
        self.set("emergency_contact_name", value)
    }

    /// A user-defined field by wire name, e.g. `udf_ind_text_1`.
    pub fn custom_field(self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_table_identifiers_round_trip() {
        assert_eq!(LookupTableType::ALL.len(), 31);
        for &table in LookupTableType::ALL {
            assert_eq!(LookupTableType::from_identifier(table.identifier()), Some(table));
            assert_eq!(
                table.service_name(),
                format!("{}_list", table.identifier())
            );
        }
        assert_eq!(LookupTableType::Hobby.service_name(), "hobby_list");
        assert_eq!(LookupTableType::from_identifier("nope"), None);
    }

    #[test]
    fn test_update_request_collects_fields() {
        let request = UpdateIndividualProfileRequest::new(48)
            .first_name("Robert")
            .gender(Gender::Male)
            .marital_status(MaritalStatus::Married)
            .birthday(NaiveDate::from_ymd_opt(1980, 5, 12).unwrap())
            .baptized(true)
            .custom_field("udf_ind_text_1", "XL")
            .first_name("Bob");

        let fields: Vec<(&str, &str)> = request
            .fields()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("baptized", "true"),
                ("birthday", "1980-05-12"),
                ("first_name", "Bob"),
                ("gender", "M"),
                ("marital_status", "m"),
                ("udf_ind_text_1", "XL"),
            ]
        );
    }

    #[test]
    fn test_update_request_is_empty_until_a_field_is_set() {
        let request = UpdateIndividualProfileRequest::new(48);
        assert!(request.is_empty());
        assert!(!request.email("bob@example.com").is_empty());
    }

    #[test]
    fn test_profile_request_builders() {
        let request = IndividualProfilesRequest::all()
            .include_inactive(true)
            .page(2, 50);
        assert_eq!(request.id, 0);
        assert_eq!(request.include_inactive, Some(true));
        assert_eq!((request.page, request.per_page), (2, 50));

        let request = IndividualProfilesRequest::by_micr("123456789", "000111");
        assert_eq!(request.routing_number.as_deref(), Some("123456789"));
        assert!(request.login.is_none());
    }
}
