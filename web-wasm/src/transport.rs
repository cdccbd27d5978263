//! XMLHttpRequestによる送信
//!
//! 取得順: `XMLHttpRequest` → `ActiveXObject("Msxml2.XMLHTTP")` → `ActiveXObject("Microsoft.XMLHTTP")`
//! ActiveX版もXMLHttpRequestと同じインターフェースとして扱う。

use imsteg_common::{
    Error, FieldValue, RawResponse, ReadyState, Result, StateCallback, SubmitRequest, Transport,
    TransportChain, TransportFactory,
};
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, FormData, XmlHttpRequest};

/// ブラウザ用のフォールバック列
pub fn browser_chain() -> TransportChain<File> {
    TransportChain::new()
        .with(XhrFactory::Native)
        .with(XhrFactory::ActiveX("Msxml2.XMLHTTP"))
        .with(XhrFactory::ActiveX("Microsoft.XMLHTTP"))
}

fn js_error(context: &str, err: JsValue) -> Error {
    Error::Transport(format!("{}: {:?}", context, err))
}

#[derive(Debug, Clone, Copy)]
pub enum XhrFactory {
    Native,
    /// ActiveXのProgID
    ActiveX(&'static str),
}

impl XhrFactory {
    fn construct_active_x(prog_id: &str) -> Result<XmlHttpRequest> {
        let constructor = Reflect::get(&js_sys::global(), &JsValue::from_str("ActiveXObject"))
            .map_err(|e| js_error("ActiveXObject lookup failed", e))?
            .dyn_into::<Function>()
            .map_err(|_| Error::Transport("ActiveXObject is not available".to_string()))?;

        let args = Array::of1(&JsValue::from_str(prog_id));
        let object = Reflect::construct(&constructor, &args)
            .map_err(|e| js_error(prog_id, e))?;
        Ok(object.unchecked_into::<XmlHttpRequest>())
    }
}

impl TransportFactory<File> for XhrFactory {
    fn name(&self) -> &str {
        match self {
            XhrFactory::Native => "XMLHttpRequest",
            XhrFactory::ActiveX(prog_id) => *prog_id,
        }
    }

    fn create(&self) -> Result<Box<dyn Transport<File>>> {
        let xhr = match self {
            XhrFactory::Native => {
                XmlHttpRequest::new().map_err(|e| js_error("XMLHttpRequest", e))?
            }
            XhrFactory::ActiveX(prog_id) => Self::construct_active_x(prog_id)?,
        };
        Ok(Box::new(XhrTransport { xhr }))
    }
}

pub struct XhrTransport {
    xhr: XmlHttpRequest,
}

/// ペイロードをFormDataへ詰める
fn to_form_data(request: SubmitRequest<File>) -> Result<FormData> {
    let form = FormData::new().map_err(|e| js_error("FormData", e))?;
    for (name, value) in request.payload.into_fields() {
        let appended = match value {
            FieldValue::Text(text) => form.append_with_str(&name, &text),
            FieldValue::File(file) => {
                form.append_with_blob_and_filename(&name, &file, &file.name())
            }
        };
        appended.map_err(|e| js_error(&name, e))?;
    }
    Ok(form)
}

impl Transport<File> for XhrTransport {
    fn send(self: Box<Self>, request: SubmitRequest<File>, on_state: StateCallback) -> Result<()> {
        let xhr = self.xhr;
        let method = request.method;
        let path = request.path;
        let form = to_form_data(request)?;

        xhr.open_with_async(method, path, true)
            .map_err(|e| js_error("open", e))?;

        let mut on_state = on_state;
        let xhr_clone = xhr.clone();
        let closure = Closure::wrap(Box::new(move || match xhr_clone.ready_state() {
            XmlHttpRequest::LOADING => on_state(ReadyState::Loading),
            XmlHttpRequest::DONE => {
                let status = xhr_clone.status().unwrap_or(0);
                let body = xhr_clone.response_text().ok().flatten().unwrap_or_default();
                on_state(ReadyState::Done(RawResponse { status, body }));
            }
            _ => {}
        }) as Box<dyn FnMut()>);

        xhr.set_onreadystatechange(Some(closure.as_ref().unchecked_ref()));
        closure.forget();

        xhr.send_with_opt_form_data(Some(&form))
            .map_err(|e| js_error("send", e))
    }
}
