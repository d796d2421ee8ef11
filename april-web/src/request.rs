//! 请求/响应抽象
//!
//! 派发边界消费的入站请求描述符与响应协作者契约。
//! 真正的网络传输在系统范围之外，由宿主实现这两个抽象。

use std::collections::HashMap;

/// 入站请求描述符
///
/// path 为请求路径，params 为具名请求值（查询参数）。
#[derive(Debug, Clone)]
pub struct WebRequest {
    path: String,
    params: HashMap<String, String>,
}

impl WebRequest {
    /// 以路径构造请求
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: HashMap::new(),
        }
    }

    /// 解析 "path?k=v&k2=v2" 形式的请求行
    pub fn parse(target: &str) -> Self {
        match target.split_once('?') {
            None => Self::new(target),
            Some((path, query)) => {
                let mut request = Self::new(path);
                for pair in query.split('&').filter(|p| !p.is_empty()) {
                    match pair.split_once('=') {
                        Some((name, value)) => {
                            request.params.insert(name.to_string(), value.to_string());
                        }
                        None => {
                            request.params.insert(pair.to_string(), String::new());
                        }
                    }
                }
                request
            }
        }
    }

    /// 链式附加一个具名请求值
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// 请求路径（未归一化）
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 按名取请求值
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// 全部具名请求值
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }
}

/// 响应协作者
///
/// 处理器可以直接向它写出，也可以返回响应体由派发器代写。
pub trait ResponseWriter: Send {
    /// 追加一段响应体文本
    fn write_body(&mut self, body: &str) -> anyhow::Result<()>;
}

/// 内存缓冲响应，用于演示与测试
#[derive(Debug, Default)]
pub struct BufferedResponse {
    body: String,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取已写出的响应体
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl ResponseWriter for BufferedResponse {
    fn write_body(&mut self, body: &str) -> anyhow::Result<()> {
        self.body.push_str(body);
        Ok(())
    }
}
