//! Role-gating policy
//!
//! The static table of which roles may invoke which boundary operation,
//! lifted from the original route definitions. `None` means any
//! authenticated account may call the operation.

use crate::domain::account::Role;

/// Boundary operations subject to role gating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListPatients,
    GetPatient,
    CreatePatient,
    UpdatePatient,
    GetPatientHistory,
    AddMedicalRecord,
    ListDoctors,
    GetDoctor,
    CreateDoctor,
    UpdateDoctor,
    ListDoctorAppointments,
    ListDoctorPatients,
    ListAppointments,
    GetAppointment,
    CreateAppointment,
    UpdateAppointmentStatus,
    ListMedicines,
    GetMedicine,
    CreateMedicine,
    UpdateMedicine,
    AdjustMedicineQuantity,
    ListLowStockMedicines,
    ListExpiredMedicines,
}

/// Roles allowed to invoke `operation`; `None` means any authenticated role
pub fn required_roles(operation: Operation) -> Option<&'static [Role]> {
    use Operation::*;
    use Role::*;

    match operation {
        ListPatients => Some(&[Admin, Doctor]),
        CreatePatient | UpdatePatient => Some(&[Admin]),
        AddMedicalRecord => Some(&[Doctor]),
        CreateDoctor | UpdateDoctor => Some(&[Admin]),
        ListDoctorAppointments | ListDoctorPatients => Some(&[Doctor]),
        UpdateAppointmentStatus => Some(&[Admin, Doctor]),
        CreateMedicine | UpdateMedicine | AdjustMedicineQuantity => Some(&[Admin]),
        GetPatient | GetPatientHistory | ListDoctors | GetDoctor | ListAppointments
        | GetAppointment | CreateAppointment | ListMedicines | GetMedicine
        | ListLowStockMedicines | ListExpiredMedicines => None,
    }
}
