//! Records returned by the CCB API and the field tables that bind them.
//!
//! The tables list only the fields this crate exposes; CCB sends many more.

use crate::core::binder::{decode_collection, decode_entity, Element, Field, Slot, XmlEntity};
use crate::utils::error::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One `<error>` reported inside a CCB response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceError {
    pub number: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: String,
}

impl XmlEntity for ServiceError {
    const ELEMENT: &'static str = "error";

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::attribute(
                "number",
                Slot::Integer(|e: &mut ServiceError, v: i64| e.number = Some(v)),
            ),
            Field::attribute(
                "type",
                Slot::Text(|e: &mut ServiceError, v: String| e.kind = Some(v)),
            ),
            Field::content(Slot::Text(|e: &mut ServiceError, v: String| e.message = v)),
        ]
    }
}

/// A link to another record by id, e.g. `<creator id="5">Jane Doe</creator>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl XmlEntity for Reference {
    const ELEMENT: &'static str = "reference";

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::attribute("id", Slot::Integer(|r: &mut Reference, v: i64| r.id = Some(v))),
            Field::content(Slot::Text(|r: &mut Reference, v: String| r.name = Some(v))),
        ]
    }
}

fn reference(node: &Element) -> Result<Option<Reference>> {
    decode_entity(node).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Campus {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub active: Option<bool>,
    pub created_by: Option<Reference>,
    pub created_time: Option<NaiveDateTime>,
    pub modified_by: Option<Reference>,
    pub modified_time: Option<NaiveDateTime>,
}

impl XmlEntity for Campus {
    const ELEMENT: &'static str = "campus";

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::attribute("id", Slot::Integer(|c: &mut Campus, v: i64| c.id = Some(v))),
            Field::element("name", Slot::Text(|c: &mut Campus, v: String| c.name = Some(v))),
            Field::element("active", Slot::Boolean(|c: &mut Campus, v: bool| c.active = Some(v))),
            Field::element(
                "creator",
                Slot::Nested(|c: &mut Campus, node: &Element| -> Result<()> {
                    c.created_by = reference(node)?;
                    Ok(())
                }),
            ),
            Field::element(
                "created",
                Slot::DateTime(|c: &mut Campus, v: NaiveDateTime| c.created_time = Some(v)),
            ),
            Field::element(
                "modifier",
                Slot::Nested(|c: &mut Campus, node: &Element| -> Result<()> {
                    c.modified_by = reference(node)?;
                    Ok(())
                }),
            ),
            Field::element(
                "modified",
                Slot::DateTime(|c: &mut Campus, v: NaiveDateTime| c.modified_time = Some(v)),
            ),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Address {
    /// `mailing`, `home`, `work` or `other`.
    pub address_type: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub line_1: Option<String>,
    pub line_2: Option<String>,
}

impl XmlEntity for Address {
    const ELEMENT: &'static str = "address";

    fn fields() -> Vec<Field<Self>> {
        type A = Address;
        vec![
            Field::attribute("type", Slot::Text(|a: &mut A, v: String| a.address_type = Some(v))),
            Field::element(
                "street_address",
                Slot::Text(|a: &mut A, v: String| a.street_address = Some(v)),
            ),
            Field::element("city", Slot::Text(|a: &mut A, v: String| a.city = Some(v))),
            Field::element("state", Slot::Text(|a: &mut A, v: String| a.state = Some(v))),
            Field::element("zip", Slot::Text(|a: &mut A, v: String| a.zip = Some(v))),
            Field::element("country", Slot::Text(|a: &mut A, v: String| a.country = Some(v))),
            Field::element("line_1", Slot::Text(|a: &mut A, v: String| a.line_1 = Some(v))),
            Field::element("line_2", Slot::Text(|a: &mut A, v: String| a.line_2 = Some(v))),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Phone {
    /// `contact`, `home`, `work`, `mobile` or `emergency`.
    pub phone_type: Option<String>,
    pub number: Option<String>,
}

impl XmlEntity for Phone {
    const ELEMENT: &'static str = "phone";

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::attribute(
                "type",
                Slot::Text(|p: &mut Phone, v: String| p.phone_type = Some(v)),
            ),
            Field::content(Slot::Text(|p: &mut Phone, v: String| p.number = Some(v))),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndividualProfile {
    pub id: Option<i64>,
    pub sync_id: Option<String>,
    pub other_id: Option<String>,
    pub giving_number: Option<String>,
    pub campus: Option<Reference>,
    pub family: Option<Reference>,
    pub family_image: Option<String>,
    pub family_position: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub legal_first_name: Option<String>,
    pub full_name: Option<String>,
    pub salutation: Option<String>,
    pub suffix: Option<String>,
    pub image: Option<String>,
    pub email: Option<String>,
    pub allergies: Option<String>,
    pub confirmed_no_allergies: Option<bool>,
    pub addresses: Option<Vec<Address>>,
    pub phones: Option<Vec<Phone>>,
    pub mobile_carrier: Option<Reference>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub anniversary: Option<NaiveDate>,
    pub baptized: Option<bool>,
    pub deceased: Option<NaiveDate>,
    pub membership_type: Option<Reference>,
    pub membership_date: Option<NaiveDate>,
    pub membership_end: Option<NaiveDate>,
    pub receive_email_from_church: Option<bool>,
    pub active: Option<bool>,
    pub login: Option<String>,
    pub limited_access_user: Option<bool>,
    pub listed: Option<bool>,
    pub created_by: Option<Reference>,
    pub created_time: Option<NaiveDateTime>,
    pub modified_by: Option<Reference>,
    pub modified_time: Option<NaiveDateTime>,
}

impl XmlEntity for IndividualProfile {
    const ELEMENT: &'static str = "individual";

    fn fields() -> Vec<Field<Self>> {
        type P = IndividualProfile;
        vec![
            Field::attribute("id", Slot::Integer(|p: &mut P, v: i64| p.id = Some(v))),
            Field::element("sync_id", Slot::Text(|p: &mut P, v: String| p.sync_id = Some(v))),
            Field::element("other_id", Slot::Text(|p: &mut P, v: String| p.other_id = Some(v))),
            Field::element(
                "giving_number",
                Slot::Text(|p: &mut P, v: String| p.giving_number = Some(v)),
            ),
            Field::element(
                "campus",
                Slot::Nested(|p: &mut P, node: &Element| -> Result<()> {
                    p.campus = reference(node)?;
                    Ok(())
                }),
            ),
            Field::element(
                "family",
                Slot::Nested(|p: &mut P, node: &Element| -> Result<()> {
                    p.family = reference(node)?;
                    Ok(())
                }),
            ),
            Field::element(
                "family_image",
                Slot::Text(|p: &mut P, v: String| p.family_image = Some(v)),
            ),
            Field::element(
                "family_position",
                Slot::Text(|p: &mut P, v: String| p.family_position = Some(v)),
            ),
            Field::element("first_name", Slot::Text(|p: &mut P, v: String| p.first_name = Some(v))),
            Field::element("last_name", Slot::Text(|p: &mut P, v: String| p.last_name = Some(v))),
            Field::element(
                "middle_name",
                Slot::Text(|p: &mut P, v: String| p.middle_name = Some(v)),
            ),
            Field::element(
                "legal_first_name",
                Slot::Text(|p: &mut P, v: String| p.legal_first_name = Some(v)),
            ),
            Field::element("full_name", Slot::Text(|p: &mut P, v: String| p.full_name = Some(v))),
            Field::element("salutation", Slot::Text(|p: &mut P, v: String| p.salutation = Some(v))),
            Field::element("suffix", Slot::Text(|p: &mut P, v: String| p.suffix = Some(v))),
            Field::element("image", Slot::Text(|p: &mut P, v: String| p.image = Some(v))),
            Field::element("email", Slot::Text(|p: &mut P, v: String| p.email = Some(v))),
            Field::element("allergies", Slot::Text(|p: &mut P, v: String| p.allergies = Some(v))),
            Field::element(
                "confirmed_no_allergies",
                Slot::Boolean(|p: &mut P, v: bool| p.confirmed_no_allergies = Some(v)),
            ),
            Field::element(
                "addresses",
                Slot::Nested(|p: &mut P, node: &Element| -> Result<()> {
                    p.addresses = Some(decode_collection(node)?);
                    Ok(())
                }),
            ),
            Field::element(
                "phones",
                Slot::Nested(|p: &mut P, node: &Element| -> Result<()> {
                    p.phones = Some(decode_collection(node)?);
                    Ok(())
                }),
            ),
            Field::element(
                "mobile_carrier",
                Slot::Nested(|p: &mut P, node: &Element| -> Result<()> {
                    p.mobile_carrier = reference(node)?;
                    Ok(())
                }),
            ),
            Field::element("gender", Slot::Text(|p: &mut P, v: String| p.gender = Some(v))),
            Field::element(
                "marital_status",
                Slot::Text(|p: &mut P, v: String| p.marital_status = Some(v)),
            ),
            Field::element("birthday", Slot::Date(|p: &mut P, v: NaiveDate| p.birthday = Some(v))),
            Field::element(
                "anniversary",
                Slot::Date(|p: &mut P, v: NaiveDate| p.anniversary = Some(v)),
            ),
            Field::element("baptized", Slot::Boolean(|p: &mut P, v: bool| p.baptized = Some(v))),
            Field::element("deceased", Slot::Date(|p: &mut P, v: NaiveDate| p.deceased = Some(v))),
            Field::element(
                "membership_type",
                Slot::Nested(|p: &mut P, node: &Element| -> Result<()> {
                    p.membership_type = reference(node)?;
                    Ok(())
                }),
            ),
            Field::element(
                "membership_date",
                Slot::Date(|p: &mut P, v: NaiveDate| p.membership_date = Some(v)),
            ),
            Field::element(
                "membership_end",
                Slot::Date(|p: &mut P, v: NaiveDate| p.membership_end = Some(v)),
            ),
            Field::element(
                "receive_email_from_church",
                Slot::Boolean(|p: &mut P, v: bool| p.receive_email_from_church = Some(v)),
            ),
            Field::element("active", Slot::Boolean(|p: &mut P, v: bool| p.active = Some(v))),
            Field::element("login", Slot::Text(|p: &mut P, v: String| p.login = Some(v))),
            Field::element(
                "limited_access_user",
                Slot::Boolean(|p: &mut P, v: bool| p.limited_access_user = Some(v)),
            ),
            Field::element("listed", Slot::Boolean(|p: &mut P, v: bool| p.listed = Some(v))),
            Field::element(
                "creator",
                Slot::Nested(|p: &mut P, node: &Element| -> Result<()> {
                    p.created_by = reference(node)?;
                    Ok(())
                }),
            ),
            Field::element(
                "created",
                Slot::DateTime(|p: &mut P, v: NaiveDateTime| p.created_time = Some(v)),
            ),
            Field::element(
                "modifier",
                Slot::Nested(|p: &mut P, node: &Element| -> Result<()> {
                    p.modified_by = reference(node)?;
                    Ok(())
                }),
            ),
            Field::element(
                "modified",
                Slot::DateTime(|p: &mut P, v: NaiveDateTime| p.modified_time = Some(v)),
            ),
        ]
    }
}

/// A user-defined field and the label the church gave it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomFieldLabel {
    /// Wire name of the field, e.g. `udf_ind_text_1`.
    pub name: Option<String>,
    pub label: Option<String>,
    pub admin_only: Option<bool>,
}

impl XmlEntity for CustomFieldLabel {
    const ELEMENT: &'static str = "custom_field";

    fn fields() -> Vec<Field<Self>> {
        type L = CustomFieldLabel;
        vec![
            Field::element("name", Slot::Text(|l: &mut L, v: String| l.name = Some(v))),
            Field::element("label", Slot::Text(|l: &mut L, v: String| l.label = Some(v))),
            Field::element(
                "admin_only",
                Slot::Boolean(|l: &mut L, v: bool| l.admin_only = Some(v)),
            ),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupTableItem {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub order: Option<i64>,
}

impl XmlEntity for LookupTableItem {
    const ELEMENT: &'static str = "item";

    fn fields() -> Vec<Field<Self>> {
        type I = LookupTableItem;
        // Older list services put the id in an attribute, newer ones in a child.
        vec![
            Field::attribute("id", Slot::Integer(|i: &mut I, v: i64| i.id = Some(v))),
            Field::element("id", Slot::Integer(|i: &mut I, v: i64| i.id = Some(v))),
            Field::element("name", Slot::Text(|i: &mut I, v: String| i.name = Some(v))),
            Field::element("order", Slot::Integer(|i: &mut I, v: i64| i.order = Some(v))),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CampusListResponse {
    pub campuses: Option<Vec<Campus>>,
}

impl XmlEntity for CampusListResponse {
    const ELEMENT: &'static str = "response";

    fn fields() -> Vec<Field<Self>> {
        vec![Field::element(
            "campuses",
            Slot::Nested(|r: &mut CampusListResponse, node: &Element| -> Result<()> {
                r.campuses = Some(decode_collection(node)?);
                Ok(())
            }),
        )]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndividualProfilesResponse {
    pub individuals: Option<Vec<IndividualProfile>>,
}

impl IndividualProfilesResponse {
    pub fn individuals(&self) -> &[IndividualProfile] {
        self.individuals.as_deref().unwrap_or_default()
    }
}

impl XmlEntity for IndividualProfilesResponse {
    const ELEMENT: &'static str = "response";

    fn fields() -> Vec<Field<Self>> {
        vec![Field::element(
            "individuals",
            Slot::Nested(
                |r: &mut IndividualProfilesResponse, node: &Element| -> Result<()> {
                    r.individuals = Some(decode_collection(node)?);
                    Ok(())
                },
            ),
        )]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomFieldLabelsResponse {
    pub custom_fields: Option<Vec<CustomFieldLabel>>,
}

impl CustomFieldLabelsResponse {
    /// Label for a field name such as `udf_ind_text_1`.
    pub fn label_for(&self, name: &str) -> Option<&str> {
        self.custom_fields
            .as_deref()?
            .iter()
            .find(|f| f.name.as_deref() == Some(name))
            .and_then(|f| f.label.as_deref())
    }
}

impl XmlEntity for CustomFieldLabelsResponse {
    const ELEMENT: &'static str = "response";

    fn fields() -> Vec<Field<Self>> {
        vec![Field::element(
            "custom_fields",
            Slot::Nested(
                |r: &mut CustomFieldLabelsResponse, node: &Element| -> Result<()> {
                    r.custom_fields = Some(decode_collection(node)?);
                    Ok(())
                },
            ),
        )]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupTableResponse {
    pub items: Option<Vec<LookupTableItem>>,
}

impl XmlEntity for LookupTableResponse {
    const ELEMENT: &'static str = "response";

    fn fields() -> Vec<Field<Self>> {
        vec![Field::element(
            "items",
            Slot::Nested(|r: &mut LookupTableResponse, node: &Element| -> Result<()> {
                r.items = Some(decode_collection(node)?);
                Ok(())
            }),
        )]
    }
}

/// CCB answers `update_individual` with the updated profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateIndividualProfileResponse {
    pub individuals: Option<Vec<IndividualProfile>>,
}

impl UpdateIndividualProfileResponse {
    pub fn individual(&self) -> Option<&IndividualProfile> {
        self.individuals.as_ref()?.first()
    }
}

impl XmlEntity for UpdateIndividualProfileResponse {
    const ELEMENT: &'static str = "response";

    fn fields() -> Vec<Field<Self>> {
        vec![Field::element(
            "individuals",
            Slot::Nested(
                |r: &mut UpdateIndividualProfileResponse, node: &Element| -> Result<()> {
                    r.individuals = Some(decode_collection(node)?);
                    Ok(())
                },
            ),
        )]
    }
}
