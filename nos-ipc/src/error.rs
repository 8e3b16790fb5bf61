//! Stable numeric classification codes for the KSM/SEM error taxonomy.
//!
//! Every fallible KSM/SEM operation returns [`nos_api::Result`]; this module
//! only adds the `u32` codes `nos-error-handling`'s classifier keys its
//! rules on. KSM codes occupy 900-909, SEM codes 910-919, kept disjoint
//! from the POSIX-errno-style codes the rest of the workspace classifies.

use nos_api::core::types::KernelError;

/// Returns the classification code for a KSM/SEM [`KernelError`] variant,
/// or `None` if `err` isn't one of the variants this crate produces.
pub fn classification_code(err: &KernelError) -> Option<u32> {
    use KernelError::*;
    Some(match err {
        BadKey => 900,
        BadHandle => 901,
        MemoryFull => 902,
        UserMemoryFull => 903,
        KeyTaken => 904,
        WrongSize => 905,
        NotCreated => 906,
        WrongDetach => 907,
        NotEligible => 908,
        NotAvailable => 909,
        OutOfSem => 910,
        SemNotEligible => 911,
        DoesNotExist => 912,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ksm_and_sem_code_ranges_are_disjoint() {
        let ksm_codes = [
            KernelError::BadKey,
            KernelError::BadHandle,
            KernelError::MemoryFull,
            KernelError::UserMemoryFull,
            KernelError::KeyTaken,
            KernelError::WrongSize,
            KernelError::NotCreated,
            KernelError::WrongDetach,
            KernelError::NotEligible,
            KernelError::NotAvailable,
        ];
        let sem_codes = [
            KernelError::OutOfSem,
            KernelError::SemNotEligible,
            KernelError::DoesNotExist,
        ];
        for k in ksm_codes {
            let code = classification_code(&k).unwrap();
            assert!((900..910).contains(&code));
        }
        for s in sem_codes {
            let code = classification_code(&s).unwrap();
            assert!((910..920).contains(&code));
        }
    }

    #[test]
    fn unrelated_kernel_errors_have_no_code() {
        assert_eq!(classification_code(&KernelError::NotFound), None);
    }
}
