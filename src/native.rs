use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_void};
use std::path::Path;
use std::ptr;

use crate::config::{StanzaDocHandle, StanzaPipelineHandle, StanzaPipelineSpec};
use crate::error::{KotokError, Result};

type FnStanzaVersion = unsafe extern "C" fn() -> *const c_char;
type FnStanzaLastError = unsafe extern "C" fn() -> *const c_char;
type FnStanzaClearError = unsafe extern "C" fn();
type FnStanzaPipelineInit = unsafe extern "C" fn(StanzaPipelineSpec) -> StanzaPipelineHandle;
type FnStanzaPipelineClose = unsafe extern "C" fn(StanzaPipelineHandle) -> c_int;
type FnStanzaAnnotate =
    unsafe extern "C" fn(StanzaPipelineHandle, *const c_char) -> StanzaDocHandle;
type FnStanzaDocNumSents = unsafe extern "C" fn(StanzaDocHandle) -> c_int;
type FnStanzaDocNumWords = unsafe extern "C" fn(StanzaDocHandle, c_int) -> c_int;
type FnStanzaDocWordLemma = unsafe extern "C" fn(StanzaDocHandle, c_int, c_int) -> *const c_char;
type FnStanzaDocWordXpos = unsafe extern "C" fn(StanzaDocHandle, c_int, c_int) -> *const c_char;
type FnStanzaDocWordUpos = unsafe extern "C" fn(StanzaDocHandle, c_int, c_int) -> *const c_char;
type FnStanzaDocClose = unsafe extern "C" fn(StanzaDocHandle) -> c_int;
type FnStanzaBuildInfo = unsafe extern "C" fn() -> *const c_char;

#[derive(Clone, Copy)]
pub(crate) struct StanzaApi {
    pub(crate) stanza_version: FnStanzaVersion,
    pub(crate) stanza_last_error: FnStanzaLastError,
    pub(crate) stanza_clear_error: FnStanzaClearError,
    pub(crate) stanza_pipeline_init: FnStanzaPipelineInit,
    pub(crate) stanza_pipeline_close: FnStanzaPipelineClose,
    pub(crate) stanza_annotate: FnStanzaAnnotate,
    pub(crate) stanza_doc_num_sents: FnStanzaDocNumSents,
    pub(crate) stanza_doc_num_words: FnStanzaDocNumWords,
    pub(crate) stanza_doc_word_lemma: FnStanzaDocWordLemma,
    pub(crate) stanza_doc_word_xpos: FnStanzaDocWordXpos,
    pub(crate) stanza_doc_word_upos: Option<FnStanzaDocWordUpos>,
    pub(crate) stanza_doc_close: FnStanzaDocClose,
    pub(crate) stanza_build_info: Option<FnStanzaBuildInfo>,
}

impl StanzaApi {
    pub(crate) unsafe fn load(library: &DynamicLibrary) -> Result<Self> {
        Ok(Self {
            stanza_version: library.load_symbol("stanza_version")?,
            stanza_last_error: library.load_symbol("stanza_last_error")?,
            stanza_clear_error: library.load_symbol("stanza_clear_error")?,
            stanza_pipeline_init: library.load_symbol("stanza_pipeline_init")?,
            stanza_pipeline_close: library.load_symbol("stanza_pipeline_close")?,
            stanza_annotate: library.load_symbol("stanza_annotate")?,
            stanza_doc_num_sents: library.load_symbol("stanza_doc_num_sents")?,
            stanza_doc_num_words: library.load_symbol("stanza_doc_num_words")?,
            stanza_doc_word_lemma: library.load_symbol("stanza_doc_word_lemma")?,
            stanza_doc_word_xpos: library.load_symbol("stanza_doc_word_xpos")?,
            stanza_doc_word_upos: library.load_symbol_optional("stanza_doc_word_upos")?,
            stanza_doc_close: library.load_symbol("stanza_doc_close")?,
            stanza_build_info: library.load_symbol_optional("stanza_build_info")?,
        })
    }
}

pub(crate) struct LoadedRuntime {
    pub(crate) _library: DynamicLibrary,
    pub(crate) api: StanzaApi,
}

#[derive(Debug)]
pub(crate) struct DynamicLibrary {
    handle: *mut c_void,
}

// The handle is an opaque OS library handle that is only used to resolve
// symbols and is freed on drop; it is safe to move and share across threads.
unsafe impl Send for DynamicLibrary {}
unsafe impl Sync for DynamicLibrary {}

impl DynamicLibrary {
    pub(crate) fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_string = path.as_ref().to_string_lossy().to_string();
        let path_c = CString::new(path_string.clone())?;
        let handle = unsafe { platform_open(path_c.as_ptr()) };
        if handle.is_null() {
            return Err(KotokError::LibraryLoad(format!(
                "{} ({})",
                path_string,
                platform_last_error()
            )));
        }
        Ok(Self { handle })
    }

    pub(crate) unsafe fn load_symbol<T: Copy>(&self, symbol_name: &str) -> Result<T> {
        let symbol_c = CString::new(symbol_name)?;
        let symbol_ptr = platform_symbol(self.handle, symbol_c.as_ptr());
        if symbol_ptr.is_null() {
            return Err(KotokError::SymbolLoad(format!(
                "{} ({})",
                symbol_name,
                platform_last_error()
            )));
        }
        Ok(std::mem::transmute_copy::<*mut c_void, T>(&symbol_ptr))
    }

    pub(crate) unsafe fn load_symbol_optional<T: Copy>(
        &self,
        symbol_name: &str,
    ) -> Result<Option<T>> {
        let symbol_c = CString::new(symbol_name)?;
        let symbol_ptr = platform_symbol(self.handle, symbol_c.as_ptr());
        if symbol_ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(std::mem::transmute_copy::<*mut c_void, T>(
            &symbol_ptr,
        )))
    }
}

impl Drop for DynamicLibrary {
    fn drop(&mut self) {
        if self.handle.is_null() {
            return;
        }
        unsafe {
            platform_close(self.handle);
        }
        self.handle = ptr::null_mut();
    }
}

pub(crate) fn clear_stanza_error(api: &StanzaApi) {
    unsafe {
        (api.stanza_clear_error)();
    }
}

pub(crate) fn read_stanza_error(api: &StanzaApi) -> Option<String> {
    let message_ptr = unsafe { (api.stanza_last_error)() };
    if message_ptr.is_null() {
        return None;
    }
    let message = unsafe { CStr::from_ptr(message_ptr) }
        .to_string_lossy()
        .trim()
        .to_string();
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

pub(crate) fn api_error(api: &StanzaApi, fallback: &str) -> KotokError {
    match read_stanza_error(api) {
        Some(message) => KotokError::Api(message),
        None => KotokError::Api(fallback.to_string()),
    }
}

pub(crate) fn cstr_to_string(pointer: *const c_char) -> String {
    if pointer.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(pointer) }
        .to_string_lossy()
        .to_string()
}

#[cfg(target_os = "windows")]
#[link(name = "kernel32")]
extern "system" {
    fn LoadLibraryA(lp_lib_file_name: *const c_char) -> *mut c_void;
    fn GetProcAddress(h_module: *mut c_void, lp_proc_name: *const c_char) -> *mut c_void;
    fn FreeLibrary(h_lib_module: *mut c_void) -> i32;
    fn GetLastError() -> u32;
}

#[cfg(target_os = "windows")]
unsafe fn platform_open(path: *const c_char) -> *mut c_void {
    LoadLibraryA(path)
}

#[cfg(target_os = "windows")]
unsafe fn platform_symbol(handle: *mut c_void, symbol: *const c_char) -> *mut c_void {
    GetProcAddress(handle, symbol)
}

#[cfg(target_os = "windows")]
unsafe fn platform_close(handle: *mut c_void) {
    let _ = FreeLibrary(handle);
}

#[cfg(target_os = "windows")]
fn platform_last_error() -> String {
    format!("GetLastError={}", unsafe { GetLastError() })
}

#[cfg(target_os = "linux")]
#[link(name = "dl")]
extern "C" {
    fn dlopen(filename: *const c_char, flags: c_int) -> *mut c_void;
    fn dlsym(handle: *mut c_void, symbol: *const c_char) -> *mut c_void;
    fn dlclose(handle: *mut c_void) -> c_int;
    fn dlerror() -> *const c_char;
}

#[cfg(target_os = "macos")]
extern "C" {
    fn dlopen(filename: *const c_char, flags: c_int) -> *mut c_void;
    fn dlsym(handle: *mut c_void, symbol: *const c_char) -> *mut c_void;
    fn dlclose(handle: *mut c_void) -> c_int;
    fn dlerror() -> *const c_char;
}

#[cfg(unix)]
unsafe fn platform_open(path: *const c_char) -> *mut c_void {
    const RTLD_NOW: c_int = 2;
    const RTLD_LOCAL: c_int = 0;
    dlopen(path, RTLD_NOW | RTLD_LOCAL)
}

#[cfg(unix)]
unsafe fn platform_symbol(handle: *mut c_void, symbol: *const c_char) -> *mut c_void {
    dlsym(handle, symbol)
}

#[cfg(unix)]
unsafe fn platform_close(handle: *mut c_void) {
    let _ = dlclose(handle);
}

#[cfg(unix)]
fn platform_last_error() -> String {
    let pointer = unsafe { dlerror() };
    if pointer.is_null() {
        "unknown error".to_string()
    } else {
        unsafe { CStr::from_ptr(pointer) }
            .to_string_lossy()
            .to_string()
    }
}
