//! Guardian model -> entity mapper

use school_core::entities::{Guardian, IdentityDocument};

use crate::models::GuardianModel;

impl From<GuardianModel> for Guardian {
    fn from(model: GuardianModel) -> Self {
        Guardian {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            other_names: model.other_names,
            email: model.email,
            phone: model.phone,
            identification: IdentityDocument {
                document_type: model.identification_document_type,
                document_number: model.identification_document_number,
                document_expiry: model.identification_document_expiry,
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
