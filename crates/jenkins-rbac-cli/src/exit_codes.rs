//! Process exit codes. Library errors carry their own code; anything else
//! (bad flags, unserializable output) is a usage error.

use jenkins_rbac::RbacError;

pub const SUCCESS: i32 = 0;
pub const USAGE_ERROR: i32 = 1;

pub fn for_error(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<RbacError>()
        .map_or(USAGE_ERROR, RbacError::exit_code)
}
