use axum::extract::{
    multipart::{Field, MultipartError},
    Multipart,
};

use crate::{
    adapters::inbound::http::dto::ApiError,
    domain::{
        errors::ValidationError,
        models::{parse_tags, MediaUpload, ResourceFields},
        value_objects::Collection,
    },
};

const IMAGE_FIELD: &str = "image";

/// Text fields and the optional file of a resource create/update form
#[derive(Debug, Default)]
pub struct ResourceForm {
    pub fields: ResourceFields,
    pub media: Option<MediaUpload>,
}

fn multipart_error(err: MultipartError) -> ApiError {
    ApiError::new(err.status(), err.body_text())
}

fn parse_order(raw: &str) -> Result<Option<u32>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| ValidationError::InvalidField {
        field: "order".to_string(),
        value: raw.to_string(),
        expected: "a non-negative integer".to_string(),
    })
}

/// Read a file part; `None` for the empty part browsers send for an
/// untouched file input
async fn read_upload(field: Field<'_>) -> Result<Option<MediaUpload>, ApiError> {
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let file_name = field.file_name().map(str::to_string);
    let data = field.bytes().await.map_err(multipart_error)?;

    if data.is_empty() && file_name.as_deref().is_none_or(str::is_empty) {
        return Ok(None);
    }

    let mut upload = MediaUpload::new(data, content_type);
    if let Some(file_name) = file_name {
        upload = upload.with_file_name(file_name);
    }
    Ok(Some(upload))
}

/// Read a multipart resource form.
///
/// The file is taken from the collection's media field (`image` or
/// `thumbnail`); unknown fields are ignored.
pub async fn read_resource_form(
    collection: Collection,
    mut multipart: Multipart,
) -> Result<ResourceForm, ApiError> {
    let mut form = ResourceForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == collection.media_field() {
            if let Some(upload) = read_upload(field).await? {
                form.media = Some(upload);
            }
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        let fields = &mut form.fields;
        match name.as_str() {
            "title" => fields.title = Some(value),
            "description" => fields.description = Some(value),
            "order" => fields.order = parse_order(&value)?,
            "status" => fields.status = Some(value),
            "isActive" => {
                let status = if value.trim() == "true" { "active" } else { "inactive" };
                fields.status = Some(status.to_string());
            }
            "icon" => fields.icon = Some(value),
            "gradient" => fields.gradient = Some(value),
            "category" => fields.category = Some(value),
            "tags" => fields.tags = Some(parse_tags(&value)),
            "youtubeUrl" => fields.youtube_url = Some(value),
            _ => {}
        }
    }

    Ok(form)
}

/// Read the single `image` part of an image library form. Other parts are
/// ignored; a missing image is a validation error.
pub async fn read_image_upload(mut multipart: Multipart) -> Result<MediaUpload, ApiError> {
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(IMAGE_FIELD) {
            if let Some(upload) = read_upload(field).await? {
                image = Some(upload);
            }
        }
    }

    image.ok_or_else(|| ValidationError::MediaRequired("Image").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order() {
        assert_eq!(parse_order(" 3 "), Ok(Some(3)));
        assert_eq!(parse_order(""), Ok(None));
        assert!(parse_order("-1").is_err());
        assert!(parse_order("first").is_err());
    }
}
