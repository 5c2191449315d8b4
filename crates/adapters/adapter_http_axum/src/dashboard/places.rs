//! Dashboard pages for places.

use std::cmp::Reverse;

use askama::Template;
use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Form, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};

use places_app::ports::PlaceStore;
use places_domain::error::BadRequestError;
use places_domain::id::PlaceId;
use places_domain::place::{ID_FIELD, Place, PlacePatch};

use crate::error::ApiError;
use crate::state::AppState;

const DASHBOARD_PATH: &str = "/dashboard";

/// Progress states offered by the form, in display order.
pub const STATUSES: [&str; 3] = ["In Progress", "Finished", "To Ask"];

/// One table row.
#[derive(Debug)]
pub struct PlaceRow {
    id: String,
    has_id: bool,
    site_name: String,
    description: String,
    date: String,
    status: String,
    ticket_added: bool,
    tone: &'static str,
    day: Option<NaiveDate>,
}

impl PlaceRow {
    fn from_place(place: &Place) -> Self {
        let text = |key: &str| place.get_str(key).unwrap_or_default().to_string();
        let date = text("date");
        let status = text("status");
        Self {
            id: place.id().unwrap_or_default().to_string(),
            has_id: place.id().is_some(),
            site_name: text("site_name"),
            description: text("description"),
            day: parse_day(&date),
            date,
            tone: tone(&status),
            status,
            ticket_added: place
                .get("ticketAdded")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }
}

/// A `<option>` of the status select.
#[derive(Debug)]
pub struct StatusOption {
    value: String,
    selected: bool,
}

/// Values shown in the add/edit form.
#[derive(Debug)]
pub struct FormView {
    /// Id of the place being edited; empty when adding.
    target_id: String,
    editing: bool,
    heading: &'static str,
    submit_label: &'static str,
    site_name: String,
    description: String,
    date: String,
    ticket_added: bool,
    statuses: Vec<StatusOption>,
}

impl FormView {
    fn blank() -> Self {
        Self {
            target_id: String::new(),
            editing: false,
            heading: "Add New Site Analysis",
            submit_label: "Add Site Analysis",
            site_name: String::new(),
            description: String::new(),
            date: today(),
            ticket_added: false,
            statuses: status_options(STATUSES[0]),
        }
    }

    fn editing(id: &PlaceId, place: &Place) -> Self {
        let row = PlaceRow::from_place(place);
        Self {
            target_id: id.to_string(),
            editing: true,
            heading: "Edit Place",
            submit_label: "Save Changes",
            statuses: status_options(&row.status),
            site_name: row.site_name,
            description: row.description,
            date: row.date,
            ticket_added: row.ticket_added,
        }
    }
}

/// Place list page template.
#[derive(Template)]
#[template(path = "place_list.html")]
pub struct PlaceListTemplate {
    rows: Vec<PlaceRow>,
    form: FormView,
}

impl IntoResponse for PlaceListTemplate {
    fn into_response(self) -> Response {
        super::render(&self)
    }
}

/// Place edit page template.
#[derive(Template)]
#[template(path = "place_edit.html")]
pub struct PlaceEditTemplate {
    form: FormView,
}

impl IntoResponse for PlaceEditTemplate {
    fn into_response(self) -> Response {
        super::render(&self)
    }
}

/// Response from the form handlers (PRG pattern).
pub enum FormResponse {
    /// Redirect back to the places table.
    Redirect(Redirect),
}

impl IntoResponse for FormResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(redirect) => redirect.into_response(),
        }
    }
}

impl FormResponse {
    fn back_to_list() -> Self {
        Self::Redirect(Redirect::to(DASHBOARD_PATH))
    }
}

/// Form data for adding or editing a place.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlaceForm {
    pub site_name: String,
    pub description: String,
    pub date: String,
    pub status: String,
    /// Present (`on`) only when the checkbox is ticked.
    pub ticket_added: Option<String>,
}

impl PlaceForm {
    /// Validate the form and turn it into place fields.
    ///
    /// # Errors
    ///
    /// Returns [`BadRequestError::BlankField`] when the site name or the
    /// description is blank.
    pub fn into_fields(self) -> Result<Map<String, Value>, BadRequestError> {
        if self.site_name.trim().is_empty() {
            return Err(BadRequestError::BlankField { field: "site_name" });
        }
        if self.description.trim().is_empty() {
            return Err(BadRequestError::BlankField {
                field: "description",
            });
        }
        let date = if self.date.trim().is_empty() {
            today()
        } else {
            self.date
        };
        let status = if self.status.trim().is_empty() {
            STATUSES[0].to_string()
        } else {
            self.status
        };

        let mut fields = Map::new();
        fields.insert("site_name".into(), Value::String(self.site_name));
        fields.insert("description".into(), Value::String(self.description));
        fields.insert("date".into(), Value::String(date));
        fields.insert("status".into(), Value::String(status));
        fields.insert(
            "ticketAdded".into(),
            Value::Bool(self.ticket_added.is_some()),
        );
        Ok(fields)
    }
}

/// `GET /dashboard`: places table, newest first, plus the add form.
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<PlaceListTemplate, ApiError>
where
    S: PlaceStore + Send + Sync + 'static,
{
    let places = state.place_service.list_places().await?;
    let mut rows: Vec<PlaceRow> = places.iter().map(PlaceRow::from_place).collect();
    sort_newest_first(&mut rows);

    Ok(PlaceListTemplate {
        rows,
        form: FormView::blank(),
    })
}

/// `POST /dashboard/places`: add a place with a fresh id (PRG).
pub async fn create<S>(
    State(state): State<AppState<S>>,
    form: Result<Form<PlaceForm>, FormRejection>,
) -> Result<FormResponse, ApiError>
where
    S: PlaceStore + Send + Sync + 'static,
{
    let Form(form) = form?;
    let fields = form.into_fields()?;

    let mut map = Map::new();
    map.insert(
        ID_FIELD.into(),
        Value::String(uuid::Uuid::new_v4().to_string()),
    );
    map.extend(fields);
    state.place_service.add_place(Place::from(map)).await?;

    Ok(FormResponse::back_to_list())
}

/// `GET /dashboard/places/{id}`: edit form for one place.
pub async fn edit<S>(
    State(state): State<AppState<S>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<PlaceEditTemplate, ApiError>
where
    S: PlaceStore + Send + Sync + 'static,
{
    let Path(id) = path?;
    let id = PlaceId::from(id);
    let place = state.place_service.get_place(id.clone()).await?;

    Ok(PlaceEditTemplate {
        form: FormView::editing(&id, &place),
    })
}

/// `POST /dashboard/places/{id}`: merge the form into the place (PRG).
pub async fn update<S>(
    State(state): State<AppState<S>>,
    path: Result<Path<String>, PathRejection>,
    form: Result<Form<PlaceForm>, FormRejection>,
) -> Result<FormResponse, ApiError>
where
    S: PlaceStore + Send + Sync + 'static,
{
    let Path(id) = path?;
    let Form(form) = form?;
    let patch = PlacePatch::from(form.into_fields()?);
    state
        .place_service
        .update_place(PlaceId::from(id), patch)
        .await?;

    Ok(FormResponse::back_to_list())
}

/// `POST /dashboard/places/{id}/delete`: remove the place (PRG).
pub async fn delete<S>(
    State(state): State<AppState<S>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<FormResponse, ApiError>
where
    S: PlaceStore + Send + Sync + 'static,
{
    let Path(id) = path?;
    state.place_service.delete_place(PlaceId::from(id)).await?;

    Ok(FormResponse::back_to_list())
}

/// Newest `date` first; rows without a readable date go last, in stored order.
fn sort_newest_first(rows: &mut [PlaceRow]) {
    rows.sort_by_key(|row| Reverse(row.day));
}

fn parse_day(date: &str) -> Option<NaiveDate> {
    let day = date.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn tone(status: &str) -> &'static str {
    match status {
        "Finished" => "finished",
        "In Progress" => "in-progress",
        "To Ask" => "to-ask",
        _ => "",
    }
}

fn status_options(current: &str) -> Vec<StatusOption> {
    let mut options: Vec<StatusOption> = STATUSES
        .iter()
        .map(|status| StatusOption {
            value: (*status).to_string(),
            selected: *status == current,
        })
        .collect();
    // keep a stored status the form does not offer
    if !current.is_empty() && !STATUSES.contains(&current) {
        options.insert(
            0,
            StatusOption {
                value: current.to_string(),
                selected: true,
            },
        );
    }
    options
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> PlaceRow {
        PlaceRow::from_place(&Place::try_from(value).unwrap())
    }

    #[test]
    fn should_sort_rows_newest_first_with_undated_last() {
        let mut rows = vec![
            row(json!({"id": "old", "date": "2023-01-05"})),
            row(json!({"id": "none"})),
            row(json!({"id": "new", "date": "2024-06-01"})),
            row(json!({"id": "stamp", "date": "2024-02-10T08:00:00Z"})),
        ];

        sort_newest_first(&mut rows);

        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["new", "stamp", "old", "none"]);
    }

    #[test]
    fn should_pick_tone_from_status() {
        assert_eq!(tone("Finished"), "finished");
        assert_eq!(tone("In Progress"), "in-progress");
        assert_eq!(tone("To Ask"), "to-ask");
        assert_eq!(tone("whatever"), "");
    }

    #[test]
    fn should_read_row_fields_leniently() {
        let parsed = row(json!({"site_name": 12, "ticketAdded": "yes"}));

        assert!(!parsed.has_id);
        assert_eq!(parsed.site_name, "");
        assert!(!parsed.ticket_added);
    }

    #[test]
    fn should_reject_blank_site_name() {
        let form = PlaceForm {
            site_name: "   ".to_string(),
            description: "North ridge".to_string(),
            ..PlaceForm::default()
        };

        assert!(matches!(
            form.into_fields(),
            Err(BadRequestError::BlankField { field: "site_name" })
        ));
    }

    #[test]
    fn should_reject_blank_description() {
        let form = PlaceForm {
            site_name: "Wind farm".to_string(),
            ..PlaceForm::default()
        };

        assert!(matches!(
            form.into_fields(),
            Err(BadRequestError::BlankField {
                field: "description"
            })
        ));
    }

    #[test]
    fn should_build_fields_from_form() {
        let form = PlaceForm {
            site_name: "Wind farm".to_string(),
            description: "North ridge".to_string(),
            date: "2024-05-01".to_string(),
            status: "Finished".to_string(),
            ticket_added: Some("on".to_string()),
        };

        let fields = form.into_fields().unwrap();

        assert_eq!(
            Value::Object(fields),
            json!({
                "site_name": "Wind farm",
                "description": "North ridge",
                "date": "2024-05-01",
                "status": "Finished",
                "ticketAdded": true
            })
        );
    }

    #[test]
    fn should_default_status_and_date_when_left_empty() {
        let form = PlaceForm {
            site_name: "Wind farm".to_string(),
            description: "North ridge".to_string(),
            ..PlaceForm::default()
        };

        let fields = form.into_fields().unwrap();

        assert_eq!(fields["status"], json!("In Progress"));
        assert_eq!(fields["ticketAdded"], json!(false));
        assert!(parse_day(fields["date"].as_str().unwrap()).is_some());
    }

    #[test]
    fn should_keep_unknown_status_selected() {
        let options = status_options("To ask");

        assert_eq!(options.len(), 4);
        assert_eq!(options[0].value, "To ask");
        assert!(options[0].selected);
        assert!(options[1..].iter().all(|o| !o.selected));
    }
}
