/// 表单中上传的图片（不落库，仅在请求内流转）
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}
