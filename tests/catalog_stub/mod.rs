use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub const DESIGN_SEARCH: &str = r#"<!doctype html>
<html>
  <body>
    <ul id="yesSchList">
      <li><div><div class="item_info">
        <div class="info_row info_name"><a class="gd_name" href="/Product/Goods/77">Design</a></div>
      </div></div></li>
      <li><div><div class="item_info">
        <div class="info_row info_name"><a class="gd_name" href="/Product/Goods/78">Design 2</a></div>
      </div></div></li>
    </ul>
  </body>
</html>
"#;

#[allow(dead_code)]
pub const EMPTY_SEARCH: &str = r#"<!doctype html>
<html><body><ul id="yesSchList"></ul><p>검색결과가 없습니다</p></body></html>
"#;

pub const DESIGN_CATALOG: &str = r#"<!doctype html>
<html>
  <body>
    <div id="yDetailTopWrap">
      <div class="topColLft">
        <div>
          <div class="gd_3dGrp"><div><span class="gd_img"><em>
            <img src="https://image.example/goods/77/3d.jpg">
          </em></span></div></div>
        </div>
      </div>
      <div class="topColRgt">
        <div class="gd_infoTop">
          <div>
            <h2>Design [Special] (Hardcover)</h2>
            <h3>A Pattern Language: Towns?</h3>
          </div>
          <span class="gd_pubArea">
            <span class="gd_auth">
              <a>Christopher Alexander</a>
              <a>Sara Ishikawa</a>
              <span><span class="moreAuthLi"><span><ul>
                <li><a>Sara Ishikawa</a></li>
                <li><a> Murray Silverstein </a></li>
              </ul></span></span></span>
            </span>
            <span class="gd_date">1977년 08월 25일</span>
          </span>
        </div>
      </div>
    </div>
    <div id="infoset_goodsCate">
      <div class="infoSetCont_wrap">
        <dl>
          <dt>카테고리 분류</dt>
          <dd><ul>
            <li><a>국내 도서</a></li>
            <li><a>건축</a></li>
            <li><a>국내도서</a></li>
          </ul></dd>
        </dl>
      </div>
    </div>
  </body>
</html>
"#;

/// Serves fixed bodies by path; anything unknown is a 404. Stalled paths are
/// accepted but never answered until the stub is dropped.
pub struct CatalogStub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl CatalogStub {
    pub fn spawn(routes: Vec<(&'static str, &'static str)>) -> Self {
        Self::spawn_with_stalls(routes, Vec::new())
    }

    #[allow(dead_code)]
    pub fn spawn_with_stalls(
        routes: Vec<(&'static str, &'static str)>,
        stalled: Vec<&'static str>,
    ) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start catalog stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        let handle = thread::spawn(move || {
            let mut held = Vec::new();
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let url = request.url().to_string();
                seen.lock().expect("request log lock").push(url.clone());
                let path = url.split('?').next().unwrap_or(&url);

                if stalled.iter().any(|stall| *stall == path) {
                    held.push(request);
                    continue;
                }

                let response = match routes.iter().find(|(route, _)| *route == path) {
                    Some((_, body)) => {
                        let header = tiny_http::Header::from_bytes(
                            &b"Content-Type"[..],
                            &b"text/html; charset=utf-8"[..],
                        )
                        .expect("build header");
                        tiny_http::Response::from_string(*body).with_header(header)
                    }
                    None => tiny_http::Response::from_string("not found").with_status_code(404),
                };
                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            requests,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("request log lock").clone()
    }
}

impl Drop for CatalogStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
