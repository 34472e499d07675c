//! User model -> entity mapper

use roster_core::User;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            display_name: model.display_name,
            battletag: model.battletag,
            is_placeholder: model.is_placeholder,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
