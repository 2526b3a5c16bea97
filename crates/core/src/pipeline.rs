//! 파이프라인 trait — 파서 확장 포인트 정의

use crate::error::ParseError;
use crate::types::AlertRecord;

/// 경보 라인 파서 trait
///
/// 새로운 라인 문법을 지원하려면 이 trait을 구현합니다.
/// 구현체는 불변 상태만 가지므로 여러 스레드에서 동기화 없이 공유할 수 있습니다.
pub trait LineParser: Send + Sync {
    /// 파서(문법) 이름
    fn format_name(&self) -> &str;

    /// 앞뒤 공백이 제거된 비어 있지 않은 한 줄을 파싱합니다.
    ///
    /// 실패 사유(문법 불일치, 숫자 변환 실패)를 [`ParseError`]로 돌려줍니다.
    /// 잘못된 입력에 대해 패닉하지 않습니다.
    fn try_parse_line(&self, line: &str) -> Result<AlertRecord, ParseError>;

    /// 한 줄을 파싱하고, 실패하면 `None`("매칭 없음")을 반환합니다.
    fn parse_line(&self, line: &str) -> Option<AlertRecord> {
        self.try_parse_line(line).ok()
    }
}
