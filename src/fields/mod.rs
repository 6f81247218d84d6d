//! Field converters between wire values and domain objects.

mod humanized_date;
mod lookup;
mod model_field;
mod model_list;
mod naive_datetime;
mod permission_list;
mod principal;
mod validate;

pub use humanized_date::{HUMANIZED_DATE_ERROR, HumanizedDate, TimeUnit};
pub use lookup::{Lookup, LookupBuilder};
pub use model_field::ModelField;
pub use model_list::ModelList;
pub use naive_datetime::NaiveDateTimeField;
pub use permission_list::PrincipalPermissionList;
pub use principal::{PrincipalField, PrincipalList};
pub use validate::{Validated, validate_with_message};
