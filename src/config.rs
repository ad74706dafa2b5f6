use std::os::raw::{c_char, c_void};

pub(crate) type StanzaPipelineHandle = *mut c_void;
pub(crate) type StanzaDocHandle = *mut c_void;

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct StanzaPipelineSpec {
    pub(crate) lang: *const c_char,
    pub(crate) package: *const c_char,
    pub(crate) pos_model_path: *const c_char,
    pub(crate) lemma_model_path: *const c_char,
    pub(crate) depparse_model_path: *const c_char,
}
