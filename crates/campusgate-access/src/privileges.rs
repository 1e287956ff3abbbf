//! The privilege filter: which access options an operator may offer a user.

use crate::catalog::{Catalog, Department, Role};
use crate::options::AccessOptions;

/// Computes the candidate pool for a user in `department` holding `role`.
///
/// The pool is, in order:
///
/// 1. every class of every department,
/// 2. the labs of `department`,
/// 3. the staff room of `department`,
/// 4. the personal rooms of `department`, only when the catalog grants
///    personal rooms to `role` (Teacher and Admin in the standard catalog).
///
/// Nothing from another department's labs, staff room or personal rooms is
/// ever included. The pool is only what may be offered; it does not
/// constrain access lists that are already stored.
pub fn filter_options(
    department: Department,
    role: Role,
    options: &AccessOptions,
    catalog: &Catalog,
) -> Vec<String> {
    let labs = options.labs_for(department);
    let staff_rooms = options.staff_rooms_for(department);
    let personal_rooms: &[String] = if catalog.grants_personal_rooms(role) {
        options.personal_rooms_for(department)
    } else {
        &[]
    };

    let mut pool = Vec::with_capacity(
        options.all_classes.len() + labs.len() + staff_rooms.len() + personal_rooms.len(),
    );
    pool.extend_from_slice(&options.all_classes);
    pool.extend_from_slice(labs);
    pool.extend_from_slice(staff_rooms);
    pool.extend_from_slice(personal_rooms);
    pool
}
