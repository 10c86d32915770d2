use crate::actor_framework::Entity;
use crate::domain::{Category, College, LookupCreate};

/// Shared shape of the category and college tables.
pub trait LookupEntry: Entity<Id = String, CreateParams = LookupCreate> {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

macro_rules! impl_lookup_entity {
    ($entity:ident, $table:literal) => {
        impl Entity for $entity {
            type Id = String;
            type CreateParams = LookupCreate;
            type Update = ();
            type Action = ();
            type ActionResult = ();

            const TABLE: &'static str = $table;

            fn from_create_params(id: String, params: LookupCreate) -> Result<Self, String> {
                let name = params.name.trim();
                if name.is_empty() {
                    return Err("Name is required".to_string());
                }
                Ok(Self { id, name: name.to_string() })
            }

            fn unique_key(&self) -> Option<String> {
                Some(self.name.clone())
            }

            fn on_update(&mut self, _update: ()) -> Result<(), String> {
                Ok(())
            }

            fn handle_action(&mut self, _action: ()) -> Result<(), String> {
                Ok(())
            }
        }

        impl LookupEntry for $entity {
            fn id(&self) -> &str {
                &self.id
            }

            fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

impl_lookup_entity!(Category, "categories");
impl_lookup_entity!(College, "colleges");
