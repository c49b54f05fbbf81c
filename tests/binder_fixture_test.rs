use ccb_api::core::binder::{decode, Envelope};
use ccb_api::{
    CampusListResponse, CustomFieldLabelsResponse, IndividualProfilesResponse,
    LookupTableResponse, Reference,
};
use chrono::NaiveDate;

const CAMPUS_LIST: &str = include_str!("fixtures/ccb_campus_list_response.xml");
const INDIVIDUAL_PROFILES: &str = include_str!("fixtures/ccb_individual_profiles_response.xml");
const ERROR_RESPONSE: &str = include_str!("fixtures/ccb_error_response.xml");
const CUSTOM_FIELD_LABELS: &str = include_str!("fixtures/ccb_custom_field_labels_response.xml");
const LOOKUP_TABLE: &str = include_str!("fixtures/ccb_lookup_table_response.xml");

/// Assert that all of the campus fields bind appropriately.
#[test]
fn test_campus_list_fixture() {
    let response: Envelope<CampusListResponse> = decode(CAMPUS_LIST.as_bytes()).unwrap();

    assert!(response.errors.is_none(), "Response should not have errors");
    let campuses = response.campuses.as_ref().expect("campuses wrapper present");
    assert_eq!(campuses.len(), 1);

    let campus = &campuses[0];
    assert_eq!(campus.id, Some(1));
    assert_eq!(campus.name.as_deref(), Some("Sample Church"));
    assert_eq!(campus.active, Some(true));
    assert_eq!(
        campus.created_by,
        Some(Reference {
            id: Some(0),
            name: Some(String::new())
        })
    );
    assert_eq!(
        campus.modified_by.as_ref().and_then(|m| m.name.as_deref()),
        Some("Jane Admin")
    );
    assert_eq!(
        campus.created_time,
        NaiveDate::from_ymd_opt(2013, 7, 3).and_then(|d| d.and_hms_opt(11, 9, 34))
    );
}

#[test]
fn test_individual_profiles_fixture() {
    let response: Envelope<IndividualProfilesResponse> =
        decode(INDIVIDUAL_PROFILES.as_bytes()).unwrap();

    assert!(response.errors.is_none());
    let individuals = response.individuals();
    assert_eq!(individuals.len(), 1);

    let bob = &individuals[0];
    assert_eq!(bob.id, Some(48));
    assert_eq!(bob.sync_id.as_deref(), Some(""));
    assert_eq!(bob.giving_number.as_deref(), Some("ABC123"));
    assert_eq!(bob.family.as_ref().and_then(|f| f.id), Some(36));
    assert_eq!(bob.legal_first_name.as_deref(), Some("Robert"));
    assert_eq!(bob.middle_name.as_deref(), Some(""));
    assert_eq!(bob.confirmed_no_allergies, Some(false));
    assert_eq!(bob.birthday, NaiveDate::from_ymd_opt(1980, 5, 12));
    assert_eq!(bob.deceased, None);
    assert_eq!(bob.membership_end, None);
    assert_eq!(
        bob.membership_type.as_ref().and_then(|m| m.name.as_deref()),
        Some("Member")
    );
    assert_eq!(bob.login.as_deref(), Some("bsmith"));
    assert_eq!(bob.limited_access_user, Some(false));
    assert_eq!(
        bob.modified_time,
        NaiveDate::from_ymd_opt(2015, 6, 30).and_then(|d| d.and_hms_opt(9, 45, 12))
    );

    let addresses = bob.addresses.as_ref().unwrap();
    assert_eq!(addresses.len(), 2);
    assert_eq!(addresses[0].country.as_deref(), Some("United States"));
    assert_eq!(addresses[1].address_type.as_deref(), Some("home"));
    assert_eq!(addresses[1].city.as_deref(), Some(""));

    let phones = bob.phones.as_ref().unwrap();
    let mobile = phones
        .iter()
        .find(|p| p.phone_type.as_deref() == Some("mobile"))
        .unwrap();
    assert_eq!(mobile.number.as_deref(), Some("(970) 555-9876"));
}

#[test]
fn test_error_fixture_keeps_errors_and_payload() {
    let response: Envelope<IndividualProfilesResponse> =
        decode(ERROR_RESPONSE.as_bytes()).unwrap();

    assert!(response.has_errors());
    let errors = response.errors.as_ref().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].number, Some(1));
    assert_eq!(errors[0].kind.as_deref(), Some("Service Permission"));
    assert_eq!(errors[1].message, "Missing required argument: password");

    // Present but empty wrapper.
    assert_eq!(response.individuals.as_ref().map(Vec::len), Some(0));
}

#[test]
fn test_custom_field_labels_fixture() {
    let response: Envelope<CustomFieldLabelsResponse> =
        decode(CUSTOM_FIELD_LABELS.as_bytes()).unwrap();

    assert_eq!(response.custom_fields.as_ref().map(Vec::len), Some(3));
    assert_eq!(response.label_for("udf_ind_pulldown_1"), Some("Volunteer Team"));
    assert_eq!(
        response.custom_fields.as_ref().unwrap()[1].admin_only,
        Some(true)
    );
}

#[test]
fn test_lookup_table_fixture() {
    let response: Envelope<LookupTableResponse> = decode(LOOKUP_TABLE.as_bytes()).unwrap();

    let names: Vec<&str> = response
        .items
        .as_ref()
        .unwrap()
        .iter()
        .filter_map(|i| i.name.as_deref())
        .collect();
    assert_eq!(names, vec!["Golf", "Hiking & Camping", "Woodworking"]);
    assert_eq!(response.items.as_ref().unwrap()[2].id, Some(3));
}

#[test]
fn test_fixture_decodes_into_wrong_payload_as_absent() {
    // A campus document decoded as profiles has no <individuals> wrapper.
    let response: Envelope<IndividualProfilesResponse> = decode(CAMPUS_LIST.as_bytes()).unwrap();
    assert!(response.individuals.is_none());
    assert!(response.individuals().is_empty());
}
